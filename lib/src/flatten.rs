use crate::model::ClassCatalog;
use log::{debug, info};

/// Names of the ancestors of `name`, nearest first. Stops at the first parent missing
/// from the catalog or at a repeated class.
fn ancestors(catalog: &ClassCatalog, name: &str) -> Vec<String> {
    let mut chain: Vec<String> = Vec::new();
    let mut current = catalog.resolvable_parent(name);
    while let Some(parent) = current {
        if parent.name() == name || chain.iter().any(|seen| seen == parent.name()) {
            break;
        }
        chain.push(parent.name().to_string());
        current = catalog.resolvable_parent(parent.name());
    }
    chain
}

/// Removes property redeclarations: a data (object) property is dropped from a class when
/// an ancestor declares a data (object) property of the same name. Passes repeat until one
/// makes no removal. Returns the number of removed declarations.
pub fn flatten(catalog: &mut ClassCatalog) -> usize {
    let mut removed = 0;
    let mut passes = 0;
    loop {
        passes += 1;
        let mut changed = false;
        for name in catalog.names() {
            let lineage = ancestors(catalog, &name);
            if lineage.is_empty() {
                continue;
            }
            let (inherited_data, inherited_objects): (Vec<String>, Vec<String>) = {
                let Some(class) = catalog.get(&name) else {
                    continue;
                };
                let data = class
                    .data_properties
                    .keys()
                    .filter(|p| {
                        lineage.iter().any(|a| {
                            catalog
                                .get(a)
                                .is_some_and(|c| c.data_properties.contains_key(p.as_str()))
                        })
                    })
                    .cloned()
                    .collect();
                let objects = class
                    .object_properties
                    .keys()
                    .filter(|p| {
                        lineage.iter().any(|a| {
                            catalog
                                .get(a)
                                .is_some_and(|c| c.object_properties.contains_key(p.as_str()))
                        })
                    })
                    .cloned()
                    .collect();
                (data, objects)
            };
            if let Some(class) = catalog.get_mut(&name) {
                for p in inherited_data {
                    debug!("{} inherits data property {}", name, p);
                    class.data_properties.shift_remove(&p);
                    removed += 1;
                    changed = true;
                }
                for p in inherited_objects {
                    debug!("{} inherits object property {}", name, p);
                    class.object_properties.shift_remove(&p);
                    removed += 1;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    info!(
        "Flattened inheritance in {} passes, removed {} redeclared properties",
        passes, removed
    );
    removed
}
