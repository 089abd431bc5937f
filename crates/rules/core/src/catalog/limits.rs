//! Limit hierarchy as an arena tree.
//!
//! Limits form up to three levels: main category → variant → modifier. The
//! tree is built once from flat definitions with parent ids and is checked
//! for unknown parents, duplicate ids, cycles and excessive depth before the
//! catalog is handed to the engine.

use std::collections::HashMap;

use serde::Serialize;

use super::LimitDefinition;
use crate::error::{CatalogError, CatalogKind};

/// Position of a limit in the hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum LimitLevel {
    Main,
    Variant,
    Modifier,
}

impl LimitLevel {
    const fn from_depth(depth: usize) -> Option<Self> {
        match depth {
            0 => Some(Self::Main),
            1 => Some(Self::Variant),
            2 => Some(Self::Modifier),
            _ => None,
        }
    }
}

/// One limit with its resolved tree links.
#[derive(Clone, Debug, PartialEq)]
pub struct LimitNode {
    pub definition: LimitDefinition,
    pub level: LimitLevel,
    parent: Option<usize>,
    root: usize,
    children: Vec<usize>,
}

impl LimitNode {
    pub fn id(&self) -> &str {
        &self.definition.id
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LimitTree {
    nodes: Vec<LimitNode>,
    index: HashMap<String, usize>,
}

impl LimitTree {
    pub fn build(definitions: Vec<LimitDefinition>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(definitions.len());
        for (i, definition) in definitions.iter().enumerate() {
            if index.insert(definition.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId {
                    kind: CatalogKind::Limit,
                    id: definition.id.clone(),
                });
            }
        }

        let mut parents = Vec::with_capacity(definitions.len());
        for definition in &definitions {
            let parent = match &definition.parent {
                Some(parent) => Some(*index.get(parent).ok_or_else(|| {
                    CatalogError::UnknownParent {
                        id: definition.id.clone(),
                        parent: parent.clone(),
                    }
                })?),
                None => None,
            };
            parents.push(parent);
        }

        let mut nodes = Vec::with_capacity(definitions.len());
        for (i, definition) in definitions.into_iter().enumerate() {
            // Walk to the root; more steps than nodes means a cycle.
            let mut depth = 0;
            let mut cursor = i;
            while let Some(parent) = parents[cursor] {
                depth += 1;
                if depth > parents.len() {
                    return Err(CatalogError::Cycle(definition.id));
                }
                cursor = parent;
            }
            let level = LimitLevel::from_depth(depth).ok_or_else(|| CatalogError::TooDeep {
                id: definition.id.clone(),
                depth: depth + 1,
            })?;
            nodes.push(LimitNode {
                definition,
                level,
                parent: parents[i],
                root: cursor,
                children: Vec::new(),
            });
        }

        for i in 0..nodes.len() {
            if let Some(parent) = nodes[i].parent {
                nodes[parent].children.push(i);
            }
        }

        Ok(Self { nodes, index })
    }

    pub fn get(&self, id: &str) -> Option<&LimitNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn parent(&self, id: &str) -> Option<&LimitNode> {
        let node = self.get(id)?;
        node.parent.map(|i| &self.nodes[i])
    }

    /// The main category a limit belongs to (the root's id).
    pub fn category(&self, id: &str) -> Option<&str> {
        let node = self.get(id)?;
        Some(self.nodes[node.root].id())
    }

    pub fn children(&self, id: &str) -> Vec<&LimitNode> {
        self.get(id)
            .map(|node| node.children.iter().map(|&i| &self.nodes[i]).collect())
            .unwrap_or_default()
    }

    /// Every descendant of `id`, deepest first.
    pub fn descendants(&self, id: &str) -> Vec<&str> {
        fn visit<'t>(tree: &'t LimitTree, node: usize, out: &mut Vec<&'t str>) {
            for &child in &tree.nodes[node].children {
                visit(tree, child, out);
                out.push(tree.nodes[child].id());
            }
        }
        let mut out = Vec::new();
        if let Some(&i) = self.index.get(id) {
            visit(self, i, &mut out);
        }
        out
    }

    pub fn roots(&self) -> impl Iterator<Item = &LimitNode> {
        self.nodes.iter().filter(|node| node.parent.is_none())
    }

    pub fn iter(&self) -> impl Iterator<Item = &LimitNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LimitCost;

    fn def(id: &str, parent: Option<&str>) -> LimitDefinition {
        LimitDefinition {
            id: id.into(),
            name: id.into(),
            parent: parent.map(Into::into),
            cost: LimitCost::Fixed(10),
            restrictions: Vec::new(),
            description: String::new(),
        }
    }

    #[test]
    fn builds_three_levels() {
        let tree = LimitTree::build(vec![
            def("charges", None),
            def("chargesSingle", Some("charges")),
            def("chargesNoRecharge", Some("chargesSingle")),
            def("cooldown", None),
        ])
        .unwrap();
        assert_eq!(tree.get("charges").unwrap().level, LimitLevel::Main);
        assert_eq!(tree.get("chargesSingle").unwrap().level, LimitLevel::Variant);
        assert_eq!(
            tree.get("chargesNoRecharge").unwrap().level,
            LimitLevel::Modifier
        );
        assert_eq!(tree.category("chargesNoRecharge"), Some("charges"));
        assert_eq!(tree.parent("chargesSingle").unwrap().id(), "charges");
        assert_eq!(tree.roots().count(), 2);
    }

    #[test]
    fn descendants_are_deepest_first() {
        let tree = LimitTree::build(vec![
            def("charges", None),
            def("chargesSingle", Some("charges")),
            def("chargesNoRecharge", Some("chargesSingle")),
            def("chargesDaily", Some("charges")),
        ])
        .unwrap();
        assert_eq!(
            tree.descendants("charges"),
            vec!["chargesNoRecharge", "chargesSingle", "chargesDaily"]
        );
        assert!(tree.descendants("chargesDaily").is_empty());
    }

    #[test]
    fn rejects_unknown_parent() {
        let err = LimitTree::build(vec![def("orphan", Some("missing"))]).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownParent { .. }));
    }

    #[test]
    fn rejects_duplicates() {
        let err = LimitTree::build(vec![def("a", None), def("a", None)]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { .. }));
    }

    #[test]
    fn rejects_cycles() {
        let err = LimitTree::build(vec![def("a", Some("b")), def("b", Some("a"))]).unwrap_err();
        assert!(matches!(err, CatalogError::Cycle(_)));
    }

    #[test]
    fn rejects_fourth_level() {
        let err = LimitTree::build(vec![
            def("a", None),
            def("b", Some("a")),
            def("c", Some("b")),
            def("d", Some("c")),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            CatalogError::TooDeep {
                id: "d".into(),
                depth: 4
            }
        );
    }
}
