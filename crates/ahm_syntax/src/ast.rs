//! Node tree produced by the parser.
//!
//! A document is a sequence of top-level nodes. Each node is either a [`Proc`] (an `@name title`
//! line plus its indented children) or a [`Text`] block of consecutive plain lines. Nodes own
//! their children outright; there is no sharing between subtrees.

// ============================================================================
// NODES
// ============================================================================

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Proc(Proc),
    Text(Text),
}

/// A directive: `@name title`, followed by an optional indented block of children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Proc {
    pub name: String,
    pub title: String,
    pub children: Vec<Node>,
}

/// Free text: consecutive plain lines joined with `\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Text {
    pub content: String,
}

impl Node {
    pub fn proc(name: impl Into<String>, title: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Proc(Proc {
            name: name.into(),
            title: title.into(),
            children,
        })
    }

    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(Text {
            content: content.into(),
        })
    }

    /// Child nodes; text nodes have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Proc(proc) => &proc.children,
            Node::Text(_) => &[],
        }
    }

    pub fn as_proc(&self) -> Option<&Proc> {
        match self {
            Node::Proc(proc) => Some(proc),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(text) => Some(text),
            Node::Proc(_) => None,
        }
    }

    /// Hand the node's fields to `consumer`.
    pub fn feed_to<C: NodeConsumer + ?Sized>(&self, consumer: &mut C) {
        match self {
            Node::Proc(proc) => consumer.proc(&proc.name, &proc.title, &proc.children),
            Node::Text(text) => consumer.text(&text.content),
        }
    }
}

impl From<Proc> for Node {
    fn from(proc: Proc) -> Self {
        Node::Proc(proc)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

/// Deep, order-sensitive structural equality of two trees.
pub fn equals(left: &Node, right: &Node) -> bool {
    left == right
}

/// Receives the fields of a node without matching on [`Node`] itself.
///
/// Recursion into `children` is up to the consumer.
pub trait NodeConsumer {
    fn proc(&mut self, name: &str, title: &str, children: &[Node]);
    fn text(&mut self, content: &str);
}

/// A whole parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }
}

impl FromIterator<Node> for Document {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_texts() {
        assert!(equals(&Node::text("a"), &Node::text("a")));
        assert!(!equals(&Node::text("a"), &Node::text("b")));
    }

    #[test]
    fn test_equal_procs() {
        let left = Node::proc("n", "t", vec![]);
        assert!(equals(&left, &left));
        assert!(equals(&left, &Node::proc("n", "t", vec![])));
        assert!(!equals(&left, &Node::proc("m", "t", vec![])));
        assert!(!equals(&left, &Node::proc("n", "u", vec![])));
        assert!(!equals(&left, &Node::proc("n", "t", vec![Node::text("x")])));
    }

    #[test]
    fn test_equality_is_deep_and_ordered() {
        let tree = |a: &str, b: &str| {
            Node::proc(
                "gp",
                "",
                vec![Node::proc("p", "", vec![Node::text(a), Node::proc(b, "", vec![])])],
            )
        };
        assert!(equals(&tree("x", "y"), &tree("x", "y")));
        assert!(!equals(&tree("x", "y"), &tree("x", "z")));

        let swapped = Node::proc("p", "", vec![Node::text("b"), Node::text("a")]);
        let ordered = Node::proc("p", "", vec![Node::text("a"), Node::text("b")]);
        assert!(!equals(&swapped, &ordered));
        assert!(!equals(&Node::text("p"), &Node::proc("p", "", vec![])));
    }

    #[derive(Default)]
    struct Outline(Vec<String>);

    impl NodeConsumer for Outline {
        fn proc(&mut self, name: &str, title: &str, children: &[Node]) {
            self.0.push(format!("@{name} {title}"));
            for child in children {
                child.feed_to(self);
            }
        }

        fn text(&mut self, content: &str) {
            self.0.push(content.to_string());
        }
    }

    #[test]
    fn test_feed_to_visits_fields() {
        let node = Node::proc("doc", "Title", vec![Node::text("body"), Node::proc("item", "", vec![])]);
        let mut outline = Outline::default();
        node.feed_to(&mut outline);
        assert_eq!(outline.0, vec!["@doc Title", "body", "@item "]);
    }

    #[test]
    fn test_accessors() {
        let node = Node::proc("doc", "", vec![Node::text("body")]);
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.as_proc().map(|p| p.name.as_str()), Some("doc"));
        assert!(node.as_text().is_none());
        assert!(node.children()[0].children().is_empty());

        let doc: Document = vec![node.clone()].into_iter().collect();
        assert_eq!(doc.len(), 1);
        assert_eq!((&doc).into_iter().next(), Some(&node));
    }
}
