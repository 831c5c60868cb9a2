//! Output sections of the generated artifact.
//!
//! Literal compilers append to three places: forward declarations (`fh`),
//! the body (`fb`), and lifecycle hooks run when the artifact is loaded and
//! discarded. [`Sections::render`] stitches them together.

const HEADER: &str = "/* Generated by vclc. Do not edit. */\n";

/// Paired init/fini fragments for one runtime resource.
///
/// Fragments are C statements, conventionally tab-indented. A trailing
/// newline is added on render if missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniFin {
    n: u32,
    pub ini: String,
    pub fin: String,
}

impl IniFin {
    /// Ordinal of this hook, starting at 1.
    pub fn n(&self) -> u32 {
        self.n
    }
}

#[derive(Debug, Clone, Default)]
pub struct Sections {
    fh: String,
    fb: String,
    inifin: Vec<IniFin>,
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the forward declarations.
    pub fn fh(&mut self, text: &str) {
        self.fh.push_str(text);
    }

    /// Append to the body.
    pub fn fb(&mut self, text: &str) {
        self.fb.push_str(text);
    }

    /// Register a new lifecycle hook and hand back a borrow to fill it in.
    pub fn new_inifin(&mut self) -> &mut IniFin {
        let n = self.inifin.len() as u32 + 1;
        self.inifin.push(IniFin {
            n,
            ..IniFin::default()
        });
        let last = self.inifin.len() - 1;
        &mut self.inifin[last]
    }

    pub fn header(&self) -> &str {
        &self.fh
    }

    pub fn body(&self) -> &str {
        &self.fb
    }

    pub fn hooks(&self) -> &[IniFin] {
        &self.inifin
    }

    /// Current end of the body, for [`Sections::rewind_body`].
    pub fn body_mark(&self) -> usize {
        self.fb.len()
    }

    /// Drop body text written after `mark`.
    pub fn rewind_body(&mut self, mark: usize) {
        self.fb.truncate(mark);
    }

    /// Final artifact text. Hooks run in registration order on load and in
    /// reverse on discard.
    pub fn render(&self) -> String {
        let mut out = String::from(HEADER);
        for section in [&self.fh, &self.fb] {
            if !section.is_empty() {
                out.push('\n');
                out.push_str(section);
            }
        }

        out.push_str("\nstatic int\nVGC_Load(VRT_CTX)\n{\n");
        for hook in &self.inifin {
            push_hook(&mut out, hook.n, &hook.ini);
        }
        out.push_str("\treturn (0);\n}\n");

        out.push_str("\nstatic int\nVGC_Discard(VRT_CTX)\n{\n");
        for hook in self.inifin.iter().rev() {
            push_hook(&mut out, hook.n, &hook.fin);
        }
        out.push_str("\treturn (0);\n}\n");
        out
    }
}

fn push_hook(out: &mut String, n: u32, fragment: &str) {
    out.push_str(&format!("\t/* {n} */\n"));
    if fragment.is_empty() {
        return;
    }
    out.push_str(fragment);
    if !fragment.ends_with('\n') {
        out.push('\n');
    }
}
