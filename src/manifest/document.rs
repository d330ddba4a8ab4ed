//! Narrow element accessor used by the nuspec loader
//!
//! The loader only needs attributes, child elements, parents and text, so it
//! is written against [`ManifestNode`] instead of a concrete XML engine.
//! Element names are local names: `<dependency>` matches whether or not the
//! document declares the nuspec namespace.

/// Read-only view of one element in a manifest document
pub trait ManifestNode: Copy {
    /// Local name of the element
    fn name(&self) -> &str;

    /// Value of an attribute without namespace
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Enclosing element, if any
    fn parent_element(&self) -> Option<Self>;

    /// Direct child elements in document order
    fn child_elements(&self) -> Vec<Self>;

    /// Text content of the element
    fn text(&self) -> Option<&str>;

    /// First direct child element with this name
    fn child_named(&self, name: &str) -> Option<Self> {
        self.child_elements()
            .into_iter()
            .find(|child| child.name() == name)
    }

    /// Every element below this one with this name, in document order
    fn descendants_named(&self, name: &str) -> Vec<Self> {
        let mut found = Vec::new();
        for child in self.child_elements() {
            if child.name() == name {
                found.push(child);
            }
            found.extend(child.descendants_named(name));
        }
        found
    }
}

impl<'a, 'input> ManifestNode for roxmltree::Node<'a, 'input> {
    fn name(&self) -> &str {
        self.tag_name().name()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        roxmltree::Node::attribute(self, name)
    }

    fn parent_element(&self) -> Option<Self> {
        roxmltree::Node::parent_element(self)
    }

    fn child_elements(&self) -> Vec<Self> {
        self.children().filter(|n| n.is_element()).collect()
    }

    fn text(&self) -> Option<&str> {
        roxmltree::Node::text(self)
    }

    fn descendants_named(&self, name: &str) -> Vec<Self> {
        self.descendants()
            .skip(1)
            .filter(|n| n.is_element() && n.tag_name().name() == name)
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeTree;
    use super::*;

    #[test]
    fn test_roxmltree_accessors() {
        let xml = r#"<package xmlns="http://schemas.microsoft.com/packaging/2011/08/nuspec.xsd">
  <metadata>
    <id>Foo</id>
    <dependencies>
      <group targetFramework="net45">
        <dependency id="Bar" version="1.0" />
      </group>
    </dependencies>
  </metadata>
</package>"#;
        let doc = roxmltree::Document::parse(xml).unwrap();
        let root = doc.root_element();
        assert_eq!(ManifestNode::name(&root), "package");

        let metadata = root.child_named("metadata").unwrap();
        let id = metadata.child_named("id").unwrap();
        assert_eq!(ManifestNode::text(&id), Some("Foo"));

        let deps = root.descendants_named("dependency");
        assert_eq!(deps.len(), 1);
        assert_eq!(ManifestNode::attribute(&deps[0], "id"), Some("Bar"));

        let group = ManifestNode::parent_element(&deps[0]).unwrap();
        assert_eq!(ManifestNode::name(&group), "group");
        assert_eq!(ManifestNode::attribute(&group, "targetFramework"), Some("net45"));
    }

    #[test]
    fn test_roxmltree_descendants_exclude_self() {
        let doc = roxmltree::Document::parse("<group><group/></group>").unwrap();
        assert_eq!(doc.root_element().descendants_named("group").len(), 1);
    }

    #[test]
    fn test_fake_tree_descendants_in_document_order() {
        let mut tree = FakeTree::new("package");
        let first = tree.add(0, "group", &[("targetFramework", "net40")]);
        tree.add(first, "dependency", &[("id", "A")]);
        let second = tree.add(0, "group", &[]);
        tree.add(second, "dependency", &[("id", "B")]);

        let ids: Vec<_> = tree
            .root()
            .descendants_named("dependency")
            .iter()
            .filter_map(|n| n.attribute("id").map(str::to_string))
            .collect();
        assert_eq!(ids, vec!["A", "B"]);
    }
}
