//! Proto document rendering
//!
//! The renderer runs one writer per section kind. Each writer fills its own
//! slot, and the assembler joins the non-empty slots in canonical order:
//! syntax, package, option, import, message, service.
//!
//! All intermediate state lives in the [`Renderer::render`] call, so one
//! renderer can be shared freely.

use crate::imports::{ImportReason, Imports};
use crate::schema::{Message, ProtoOption, Schema, Service};

/// Output sections in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Syntax,
    Package,
    Option,
    Import,
    Message,
    Service,
}

const SECTION_COUNT: usize = 6;

/// Renders a [`Schema`] into proto text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    /// Drop every line break and indentation tab
    pub compact: bool,

    /// Tab-indent field and method lines (ignored when compact)
    pub indent: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            compact: false,
            indent: true,
        }
    }
}

impl Renderer {
    /// Create a renderer with indentation enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Set compact mode
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Set indentation
    pub fn indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    /// Render a schema into a proto document
    pub fn render(&self, schema: &Schema) -> String {
        let mut slots: [String; SECTION_COUNT] = Default::default();
        let mut imports = Imports::default();

        if let Some(syntax) = &schema.syntax {
            slots[Section::Syntax as usize] = self.write_syntax(syntax);
        }
        if let Some(package) = &schema.package {
            slots[Section::Package as usize] = self.write_package(package);
        }
        slots[Section::Option as usize] = self.write_options(&schema.options);
        slots[Section::Message as usize] = self.write_messages(&schema.messages);
        slots[Section::Service as usize] = self.write_services(&schema.services, &mut imports);

        // Services run before imports so their requests are collected.
        slots[Section::Import as usize] = self.write_imports(&imports);

        self.assemble(&slots)
    }

    fn write_syntax(&self, syntax: &str) -> String {
        format!("syntax = \"{syntax}\";")
    }

    fn write_package(&self, package: &str) -> String {
        format!("package {package};")
    }

    fn write_options(&self, options: &[ProtoOption]) -> String {
        let mut block = Block::new(self);
        for (i, option) in options.iter().enumerate() {
            if i > 0 {
                block.newline();
            }
            block.push(&format!("option \"{}\" = \"{}\";", option.name, option.value));
        }
        block.finish()
    }

    fn write_imports(&self, imports: &Imports) -> String {
        let mut block = Block::new(self);
        for (i, path) in imports.paths().into_iter().enumerate() {
            if i > 0 {
                block.newline();
            }
            block.push(&format!("import \"{path}\";"));
        }
        block.finish()
    }

    fn write_messages(&self, messages: &[Message]) -> String {
        let mut block = Block::new(self);
        for (i, message) in messages.iter().enumerate() {
            if i > 0 {
                block.blank_line();
            }
            block.push(&format!("message {} {{", message.name));
            // Tags are dense and start at 1 for every message.
            for (tag, field) in (1..).zip(&message.fields) {
                block.newline();
                block.tab();
                block.push(&format!("{} {} = {};", field.type_name, field.name, tag));
            }
            block.newline();
            block.push("}");
        }
        block.finish()
    }

    fn write_services(&self, services: &[Service], imports: &mut Imports) -> String {
        let mut block = Block::new(self);
        for (i, service) in services.iter().enumerate() {
            if i > 0 {
                block.blank_line();
            }
            block.push(&format!("service {} {{", service.name));
            for method in &service.methods {
                if method.input.is_empty_type() || method.output.is_empty_type() {
                    imports.require(ImportReason::EmptyType);
                }
                block.newline();
                block.tab();
                block.push(&format!(
                    "rpc {} ({}) returns ({}) {{}};",
                    method.name, method.input, method.output
                ));
            }
            block.newline();
            block.push("}");
        }
        block.finish()
    }

    /// Join non-empty slots with one blank line between neighbours
    fn assemble(&self, slots: &[String]) -> String {
        let mut block = Block::new(self);
        for slot in slots.iter().filter(|s| !s.is_empty()) {
            if !block.buf.is_empty() {
                block.blank_line();
            }
            block.push(slot);
        }
        block.finish()
    }
}

/// Text buffer that applies the renderer's whitespace settings
struct Block<'a> {
    renderer: &'a Renderer,
    buf: String,
}

impl<'a> Block<'a> {
    fn new(renderer: &'a Renderer) -> Self {
        Self {
            renderer,
            buf: String::new(),
        }
    }

    fn push(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    fn newline(&mut self) {
        if !self.renderer.compact {
            self.buf.push('\n');
        }
    }

    fn blank_line(&mut self) {
        self.newline();
        self.newline();
    }

    fn tab(&mut self) {
        if self.renderer.indent && !self.renderer.compact {
            self.buf.push('\t');
        }
    }

    fn finish(self) -> String {
        self.buf
    }
}
