//! Blade template assembly.
//!
//! Three output shapes exist: a combined `@switch` file holding every icon,
//! a standalone component per icon, and a standalone component per icon
//! that takes a `variant` prop. Template syntax is emitted as plain text.

use std::io::Write;

use crate::artifact::IconArtifact;
use crate::error::IconError;

/// File extension of every generated template.
pub const TEMPLATE_EXTENSION: &str = ".blade.php";

const PLAIN_PROPS: &str = "@props(['name' => null, 'default' => 'size-4'])";
const PLAIN_ATTRIBUTES: &str = "{{ $attributes->merge(['class' => $default]) }}";
const VARIANT_ATTRIBUTES: &str =
    "{{ $attributes->class($classes) }} data-flux-icon aria-hidden=\"true\"";

/// Size class per variant.
const VARIANT_SIZES: &[(&str, &str)] = &[
    ("outline", "[:where(&)]:size-6"),
    ("solid", "[:where(&)]:size-6"),
    ("mini", "[:where(&)]:size-5"),
    ("micro", "[:where(&)]:size-4"),
];

fn push_svg(out: &mut String, artifact: &IconArtifact, attributes: &str) {
    out.push_str(&artifact.open_tag(attributes));
    out.push('\n');
    out.push_str(&artifact.inner_markup);
    out.push_str("\n</svg>\n");
}

/// Standalone component with a `name`/`default` size-class pair.
pub fn render_plain(artifact: &IconArtifact) -> String {
    let mut out = String::new();
    out.push_str(PLAIN_PROPS);
    out.push_str("\n\n");
    push_svg(&mut out, artifact, PLAIN_ATTRIBUTES);
    out
}

/// Standalone component driven by a `variant` prop.
pub fn render_variant(artifact: &IconArtifact) -> String {
    let mut out = String::new();
    out.push_str("@php $attributes = $unescapedForwardedAttributes ?? $attributes; @endphp\n\n");
    out.push_str("@props([\n\t'variant' => 'outline',\n])\n\n");
    out.push_str("@php\n$classes = Flux::classes('shrink-0')\n->add(match($variant) {\n");
    for (variant, class) in VARIANT_SIZES {
        out.push_str(&format!("\t'{}' => '{}',\n", variant, class));
    }
    out.push_str("});\n@endphp\n\n");
    push_svg(&mut out, artifact, VARIANT_ATTRIBUTES);
    out
}

/// One `@case` block of a combined file.
pub fn render_case(artifact: &IconArtifact) -> String {
    let mut out = format!("@case('{}')\n", artifact.name.replace('\'', "\\'"));
    push_svg(&mut out, artifact, PLAIN_ATTRIBUTES);
    out.push_str("@break\n");
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwitchState {
    Uninitialized,
    Open,
    Closed,
}

impl SwitchState {
    fn describe(self) -> &'static str {
        match self {
            SwitchState::Uninitialized => "not opened yet",
            SwitchState::Open => "already open",
            SwitchState::Closed => "already closed",
        }
    }
}

/// Writer for a combined `@switch` file.
///
/// `open` writes the header, `append` adds one case per icon, and `close`
/// ends the switch. Calls out of that order fail with
/// [`IconError::Assembly`]. Duplicate icon names are written as-is.
pub struct SwitchFile<W: Write> {
    out: W,
    state: SwitchState,
    cases: usize,
}

impl<W: Write> SwitchFile<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            state: SwitchState::Uninitialized,
            cases: 0,
        }
    }

    fn expect_state(&self, expected: SwitchState, operation: &'static str) -> Result<(), IconError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(IconError::Assembly {
                operation,
                state: self.state.describe(),
            })
        }
    }

    pub fn open(&mut self) -> Result<(), IconError> {
        self.expect_state(SwitchState::Uninitialized, "open")?;
        writeln!(self.out, "{}\n@switch($name)", PLAIN_PROPS)?;
        self.state = SwitchState::Open;
        Ok(())
    }

    pub fn append(&mut self, artifact: &IconArtifact) -> Result<(), IconError> {
        self.expect_state(SwitchState::Open, "append to")?;
        self.out.write_all(render_case(artifact).as_bytes())?;
        self.cases += 1;
        Ok(())
    }

    pub fn close(&mut self) -> Result<(), IconError> {
        self.expect_state(SwitchState::Open, "close")?;
        writeln!(self.out, "@endswitch")?;
        self.out.flush()?;
        self.state = SwitchState::Closed;
        Ok(())
    }

    /// Number of cases appended so far.
    pub fn cases(&self) -> usize {
        self.cases
    }

    pub fn is_closed(&self) -> bool {
        self.state == SwitchState::Closed
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Render a complete combined file for `artifacts`, in order.
pub fn render_switch(artifacts: &[IconArtifact]) -> Result<String, IconError> {
    let mut file = SwitchFile::new(Vec::new());
    file.open()?;
    for artifact in artifacts {
        file.append(artifact)?;
    }
    file.close()?;
    let bytes = file.into_inner();
    String::from_utf8(bytes).map_err(|e| IconError::Utf8(e.utf8_error()))
}
