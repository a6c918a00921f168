//! html5ever `TreeSink` that builds a [`MarkupTree`].

use std::borrow::Cow;
use std::cell::{Cell, RefCell};

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute as Html5Attribute, QualName};

use super::tree::{Attribute, MarkupTree, NodeData, NodeId};

/// Handle used by the tree builder to reference nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHandle(pub NodeId);

impl Default for NodeHandle {
    fn default() -> Self {
        NodeHandle(NodeId::NONE)
    }
}

/// Sink that builds a [`MarkupTree`] and counts recoverable parse errors.
///
/// html5ever's `TreeSink` takes `&self`, so the tree sits behind a `RefCell`.
pub struct TreeBuilder {
    tree: RefCell<MarkupTree>,
    parse_errors: Cell<usize>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            tree: RefCell::new(MarkupTree::new()),
            parse_errors: Cell::new(0),
        }
    }

    /// Consume the sink, returning the tree and the number of parse errors seen.
    pub fn into_parts(self) -> (MarkupTree, usize) {
        (self.tree.into_inner(), self.parse_errors.get())
    }

    fn insert(&self, parent: NodeId, child: NodeOrText<NodeHandle>) {
        let mut tree = self.tree.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => tree.append(parent, node.0),
            NodeOrText::AppendText(text) => tree.append_text(parent, &text),
        }
    }
}

impl TreeSink for TreeBuilder {
    type Handle = NodeHandle;
    type Output = Self;
    type ElemName<'a>
        = &'a QualName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        log::trace!("markup parse error: {msg}");
        self.parse_errors.set(self.parse_errors.get() + 1);
    }

    fn get_document(&self) -> Self::Handle {
        NodeHandle(self.tree.borrow().document())
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        static EMPTY: QualName = QualName {
            prefix: None,
            ns: html5ever::ns!(),
            local: html5ever::local_name!(""),
        };

        let tree = self.tree.borrow();
        match tree.get(target.0).map(|n| &n.data) {
            Some(NodeData::Element { name, .. }) => {
                // SAFETY: nodes are never removed from the arena while the sink
                // is alive, and element names are never rewritten, so the
                // QualName outlives the RefCell guard dropped here.
                unsafe { std::mem::transmute::<&QualName, &'a QualName>(name) }
            }
            _ => &EMPTY,
        }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Html5Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let attrs = attrs
            .into_iter()
            .map(|a| Attribute {
                name: a.name,
                value: a.value.to_string(),
            })
            .collect();
        NodeHandle(self.tree.borrow_mut().create_element(name, attrs))
    }

    fn create_comment(&self, _text: StrTendril) -> Self::Handle {
        NodeHandle(self.tree.borrow_mut().create_comment())
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Self::Handle {
        NodeHandle(self.tree.borrow_mut().create_comment())
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        self.insert(parent.0, child);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let parent = self
            .tree
            .borrow()
            .get(element.0)
            .map(|n| n.parent)
            .unwrap_or(NodeId::NONE);
        if parent.is_some() {
            self.insert(parent, child);
        } else {
            self.insert(prev_element.0, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        let mut tree = self.tree.borrow_mut();
        let doc = tree.document();
        let doctype = tree.create_doctype();
        tree.append(doc, doctype);
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        // Template contents stay inline; the filter drops <template> anyway
        *target
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x.0 == y.0
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let mut tree = self.tree.borrow_mut();
        match new_node {
            NodeOrText::AppendNode(node) => tree.insert_before(sibling.0, node.0),
            NodeOrText::AppendText(text) => {
                let text_node = tree.create_text(text.to_string());
                tree.insert_before(sibling.0, text_node);
            }
        }
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Html5Attribute>) {
        let mut tree = self.tree.borrow_mut();
        if let Some(node) = tree.get_mut(target.0)
            && let NodeData::Element {
                attrs: existing, ..
            } = &mut node.data
        {
            for attr in attrs {
                if !existing.iter().any(|a| a.name == attr.name) {
                    existing.push(Attribute {
                        name: attr.name,
                        value: attr.value.to_string(),
                    });
                }
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.tree.borrow_mut().detach(target.0);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let mut tree = self.tree.borrow_mut();
        let children: Vec<_> = tree.children(node.0).collect();
        for child in children {
            tree.detach(child);
            tree.append(new_parent.0, child);
        }
    }
}
