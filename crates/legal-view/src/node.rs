/// Elements that end a line in [`ViewNode::readable_text`]
const BLOCK_TAGS: &[&str] = &["div", "p", "ul", "li", "h4", "h5"];

/// A node of a typed virtual-DOM tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
    Element(ElementNode),
    Text(String),
}

/// An element with its tag, class list, attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    pub tag: &'static str,
    pub class: String,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<ViewNode>,
}

/// Start building an element
pub fn el(tag: &'static str) -> ElementNode {
    ElementNode {
        tag,
        class: String::new(),
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

impl ElementNode {
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<ViewNode>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ViewNode>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(ViewNode::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class.split_whitespace().any(|c| c == class)
    }
}

impl From<ElementNode> for ViewNode {
    fn from(node: ElementNode) -> Self {
        ViewNode::Element(node)
    }
}

impl From<String> for ViewNode {
    fn from(text: String) -> Self {
        ViewNode::Text(text)
    }
}

impl From<&str> for ViewNode {
    fn from(text: &str) -> Self {
        ViewNode::Text(text.to_string())
    }
}

impl ViewNode {
    /// Concatenated text of the subtree, like DOM `textContent`
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            ViewNode::Text(text) => out.push_str(text),
            ViewNode::Element(node) => {
                for child in &node.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Text of the subtree as it reads on screen: `br` and the end of each
    /// block element become a newline, consecutive breaks collapse.
    pub fn readable_text(&self) -> String {
        let mut out = String::new();
        self.collect_readable(&mut out);
        out.trim().to_string()
    }

    fn collect_readable(&self, out: &mut String) {
        match self {
            ViewNode::Text(text) => out.push_str(text),
            ViewNode::Element(node) if node.tag == "br" => out.push('\n'),
            ViewNode::Element(node) => {
                for child in &node.children {
                    child.collect_readable(out);
                }
                if BLOCK_TAGS.contains(&node.tag) && !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            ViewNode::Element(node) => Some(node),
            ViewNode::Text(_) => None,
        }
    }

    /// All elements in document order carrying `class`
    pub fn find_by_class(&self, class: &str) -> Vec<&ElementNode> {
        let mut found = Vec::new();
        self.walk(&mut |node| {
            if node.has_class(class) {
                found.push(node);
            }
        });
        found
    }

    /// All elements in document order with the given tag
    pub fn find_by_tag(&self, tag: &str) -> Vec<&ElementNode> {
        let mut found = Vec::new();
        self.walk(&mut |node| {
            if node.tag == tag {
                found.push(node);
            }
        });
        found
    }

    fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a ElementNode)) {
        if let ViewNode::Element(node) = self {
            visit(node);
            for child in &node.children {
                child.walk(visit);
            }
        }
    }
}
