//! Serializes a `Program` as its XML representation.
use super::ast::{Argument, Instruction, Program};

const DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";
const INDENT: &str = " ";

/// Renders the whole document. The result always ends with a newline.
pub fn render(program: &Program) -> String {
    let mut w = Writer::new();
    w.line(0, DECLARATION);

    let root = format!("program language=\"{}\"", escape_attribute(program.language()));
    if program.is_empty() {
        w.line(0, &format!("<{}/>", root));
        return w.finish();
    }

    w.line(0, &format!("<{}>", root));
    for ins in program.instructions.iter() {
        instruction(&mut w, ins);
    }
    w.line(0, "</program>");
    w.finish()
}

fn instruction(w: &mut Writer, ins: &Instruction) {
    let tag = format!(
        "instruction order=\"{}\" opcode=\"{}\"",
        ins.order,
        escape_attribute(&ins.opcode.to_string())
    );

    if ins.args.is_empty() {
        w.line(1, &format!("<{}/>", tag));
        return;
    }

    w.line(1, &format!("<{}>", tag));
    for (idx, arg) in ins.args.iter().enumerate() {
        argument(w, idx + 1, arg);
    }
    w.line(1, "</instruction>");
}

fn argument(w: &mut Writer, position: usize, arg: &Argument) {
    w.line(2, &format!(
        "<arg{pos} type=\"{ty}\">{text}</arg{pos}>",
        pos = position,
        ty = escape_attribute(arg.type_name()),
        text = escape_text(arg.text()),
    ));
}

struct Writer {
    out: String,
}

impl Writer {
    fn new() -> Self {
        Writer { out: String::with_capacity(4096) }
    }

    fn line(&mut self, depth: usize, content: &str) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(content);
        self.out.push('\n');
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Escapes element text.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes a double-quoted attribute value.
pub fn escape_attribute(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
