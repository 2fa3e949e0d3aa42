use crate::layout::{layout, PrintItem};
use crate::stylesheet::print_stylesheet;
use scriptpad_model::{Block, PageGeometry};
use tracing::instrument;

/// Element id of the print container
pub const PRINT_CONTAINER_ID: &str = "script-editor-print";

/// Options for print HTML compilation
#[derive(Debug, Clone)]
pub struct PrintOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Id of the wrapping container
    pub container_id: String,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            container_id: PRINT_CONTAINER_ID.to_string(),
        }
    }
}

struct Context {
    options: PrintOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: PrintOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile a print flow to an HTML fragment wrapped in the print container
pub fn compile_print_html(flow: &[PrintItem], options: PrintOptions) -> String {
    let mut ctx = Context::new(options);
    compile_container(flow, &mut ctx);
    ctx.get_output()
}

fn compile_container(flow: &[PrintItem], ctx: &mut Context) {
    let open = format!(
        "<div id=\"{}\" aria-hidden=\"true\">",
        escape_html(&ctx.options.container_id)
    );
    ctx.add_line(&open);
    ctx.indent();
    for item in flow {
        compile_item(item, ctx);
    }
    ctx.dedent();
    ctx.add_line("</div>");
}

fn compile_item(item: &PrintItem, ctx: &mut Context) {
    let id = escape_html(item.block_id().as_str());

    match item {
        PrintItem::SceneRow {
            left,
            center,
            right,
            ..
        } => {
            ctx.add_line(&format!(
                "<div class=\"pb p-allow-break p-scene\" data-block-id=\"{}\">",
                id
            ));
            ctx.indent();
            ctx.add_line(&format!("<div class=\"l\">{}</div>", escape_html(left)));
            ctx.add_line(&format!("<div class=\"c\">{}</div>", escape_html(center)));
            ctx.add_line(&format!("<div class=\"r\">{}</div>", escape_html(right)));
            ctx.dedent();
            ctx.add_line("</div>");
        }
        PrintItem::Action { text, .. } => {
            ctx.add_line(&format!(
                "<div class=\"pb p-allow-break p-action\" data-block-id=\"{}\">{}</div>",
                id,
                escape_html(text)
            ));
        }
        PrintItem::Dialogue {
            character,
            separator,
            text,
            ..
        } => {
            ctx.add_line(&format!(
                "<div class=\"pb p-allow-break p-dialogue\" data-block-id=\"{}\">",
                id
            ));
            ctx.indent();
            ctx.add_line(&format!(
                "<div class=\"char\">{}</div>",
                escape_html(character)
            ));
            ctx.add_line(&format!(
                "<div class=\"sep\">{}</div>",
                escape_html(&separator.to_string())
            ));
            ctx.add_line(&format!("<div class=\"txt\">{}</div>", escape_html(text)));
            ctx.dedent();
            ctx.add_line("</div>");
        }
        PrintItem::Transition { text, .. } => {
            ctx.add_line(&format!(
                "<div class=\"pb p-allow-break p-trans\" data-block-id=\"{}\">{}</div>",
                id,
                escape_html(text)
            ));
        }
    }
}

/// Standalone print document for the full block list.
///
/// Always renders every block, independent of any active search filter.
#[instrument(skip(blocks, page), fields(blocks = blocks.len()))]
pub fn render_print_document(blocks: &[Block], page: &PageGeometry) -> String {
    let flow = layout(blocks);
    let options = PrintOptions::default();
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();
    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line("<meta charset=\"utf-8\">");
    ctx.add_line("<style>");
    for rule in print_stylesheet(page).lines() {
        ctx.add_line(rule);
    }
    ctx.add_line("</style>");
    ctx.dedent();
    ctx.add_line("</head>");
    ctx.add_line("<body>");
    ctx.indent();
    compile_container(&flow, &mut ctx);
    ctx.dedent();
    ctx.add_line("</body>");
    ctx.dedent();
    ctx.add_line("</html>");

    tracing::debug!(items = flow.len(), "rendered print document");
    ctx.get_output()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
