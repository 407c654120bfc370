use crate::model::{chain_depth, ClassCatalog, ClassInfo};

/// Number of parent hops from `name` to a class with no resolvable parent. A parent chain
/// that revisits a class counts as depth 0.
pub fn depth(catalog: &ClassCatalog, name: &str) -> usize {
    chain_depth(name, |n| catalog.resolvable_parent(n).map(ClassInfo::name))
}

/// Orders the catalog by ascending inheritance depth, keeping catalog order among classes
/// of equal depth, so every class follows its parent.
pub fn emit(catalog: &ClassCatalog) -> Vec<ClassInfo> {
    let mut ordered: Vec<(usize, &ClassInfo)> = catalog
        .iter()
        .map(|class| (depth(catalog, class.name()), class))
        .collect();
    ordered.sort_by_key(|(d, _)| *d);
    ordered.into_iter().map(|(_, class)| class.clone()).collect()
}
