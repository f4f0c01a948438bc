/// Joins the lines of a text node with `\n`.
///
/// A single trailing line break (left by an empty last line) is dropped on [`TextBuilder::build`].
#[derive(Debug, Default)]
struct TextBuilder {
    content: String,
    lines: usize,
}

impl TextBuilder {
    fn new() -> Self {
        Self::default()
    }

    fn push_line(&mut self, line: &str) {
        if self.lines > 0 {
            self.content.push('\n');
        }
        self.content.push_str(line);
        self.lines += 1;
    }

    fn build(self) -> Text {
        let mut content = self.content;
        if content.ends_with('\n') {
            content.pop();
        }
        Text { content }
    }
}
