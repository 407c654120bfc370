use crate::consts::{ALL_VALUES_FROM, ON_PROPERTY, RESTRICTION, SUB_CLASS_OF};
use crate::graph::OntologyGraph;
use crate::model::{ClassCatalog, Diagnostic, ObjectType, PropertyType};
use crate::names::{property_identifier, short_name_of};
use crate::types::{resolve_type_with_search, ClassSearch};
use log::{debug, info, warn};
use oxigraph::model::Term;

struct Declared {
    class: String,
    property: String,
    ty: PropertyType,
}

/// Collects the properties each class declares through `owl:Restriction` superclasses
/// that carry both `owl:onProperty` and `owl:allValuesFrom`. Scalar-typed properties land
/// in `data_properties`, everything else in `object_properties`. A property name already
/// declared on the class, in either map, is not overwritten.
pub fn extract_properties<G: OntologyGraph + ?Sized>(
    catalog: &mut ClassCatalog,
    graph: &G,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut declared: Vec<Declared> = Vec::new();
    for class in catalog.iter() {
        let node = Term::NamedNode(class.uri().into_owned());
        for restriction in graph.objects_of(&node, SUB_CLASS_OF) {
            if !graph.has_type(&restriction, RESTRICTION) {
                continue;
            }
            let (property, values) = match (
                graph.value_of(&restriction, ON_PROPERTY),
                graph.value_of(&restriction, ALL_VALUES_FROM),
            ) {
                (Some(p), Some(v)) => (p, v),
                // cardinality-only and similar restrictions say nothing about the value type
                _ => continue,
            };
            let name = property_identifier(&short_name_of(&property));
            if name.is_empty() {
                continue;
            }
            let (ty, search) = resolve_type_with_search(graph, &values, catalog);
            if let Some(ClassSearch::Ambiguous(candidates)) = search {
                warn!(
                    "{}.{} has ambiguous type [{}]",
                    class.name(),
                    name,
                    candidates.iter().cloned().collect::<Vec<_>>().join(", ")
                );
                diagnostics.push(Diagnostic::AmbiguousType {
                    class: class.name().to_string(),
                    property: name.clone(),
                    candidates: candidates.into_iter().collect(),
                });
            }
            declared.push(Declared {
                class: class.name().to_string(),
                property: name,
                ty,
            });
        }
    }

    let mut count = 0;
    for Declared {
        class,
        property,
        ty,
    } in declared
    {
        let Some(info) = catalog.get_mut(&class) else {
            continue;
        };
        if info.declares(&property) {
            debug!("{}.{} already declared; keeping first", class, property);
            continue;
        }
        debug!("{}.{}: {}", class, property, ty);
        match ty {
            PropertyType::Scalar(kind) => {
                info.data_properties.entry(property).or_insert(kind);
            }
            PropertyType::ClassRef(target) => {
                info.object_properties
                    .entry(property)
                    .or_insert(ObjectType::Class(target));
            }
            PropertyType::Unknown => {
                info.object_properties
                    .entry(property)
                    .or_insert(ObjectType::Unknown);
            }
        }
        count += 1;
    }
    info!("Extracted {} property declarations", count);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;
    use crate::consts::{CLASS, TYPE, XSD_BOOLEAN, XSD_STRING};
    use crate::graph::ordered::{iri, OrderedTriples};
    use crate::hierarchy::resolve_parents;
    use crate::model::ScalarKind;
    use crate::util::graph_from_str;
    use oxigraph::io::RdfFormat;

    fn extract(ttl: &str) -> (ClassCatalog, Vec<Diagnostic>) {
        let graph = graph_from_str(ttl, RdfFormat::Turtle).unwrap();
        let mut diagnostics = vec![];
        let mut catalog = build_catalog(&graph, &mut diagnostics);
        resolve_parents(&mut catalog, &graph, &mut diagnostics);
        extract_properties(&mut catalog, &graph, &mut diagnostics);
        (catalog, diagnostics)
    }

    #[test]
    fn test_data_and_object_properties() {
        let (catalog, diagnostics) = extract(
            r#"
            @prefix owl: <http://www.w3.org/2002/07/owl#> .
            @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
            @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
            @prefix cim: <http://iec.ch/TC57/CIM100#> .

            cim:BaseVoltage a owl:Class .
            cim:ConductingEquipment a owl:Class ;
                rdfs:subClassOf [ a owl:Restriction ;
                    owl:onProperty cim:ConductingEquipment.BaseVoltage ;
                    owl:allValuesFrom cim:BaseVoltage ] ,
                [ a owl:Restriction ;
                    owl:onProperty cim:Equipment.inService ;
                    owl:allValuesFrom xsd:boolean ] ,
                [ a owl:Restriction ;
                    owl:onProperty cim:ConductingEquipment.Terminals ;
                    owl:minCardinality 1 ] ,
                [ a owl:Restriction ;
                    owl:onProperty cim:ConductingEquipment.Mystery ;
                    owl:allValuesFrom cim:NotDeclared ] .
        "#,
        );
        let equipment = catalog.get("ConductingEquipment").unwrap();
        assert_eq!(
            equipment.data_properties.get("InService"),
            Some(&ScalarKind::Boolean)
        );
        assert_eq!(
            equipment.object_properties.get("BaseVoltage"),
            Some(&ObjectType::Class("BaseVoltage".to_string()))
        );
        assert_eq!(
            equipment.object_properties.get("Mystery"),
            Some(&ObjectType::Unknown)
        );
        assert!(!equipment.declares("Terminals"));
        assert_eq!(equipment.data_properties.len(), 1);
        assert_eq!(equipment.object_properties.len(), 2);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_ambiguous_union_is_reported() {
        let (catalog, diagnostics) = extract(
            r#"
            @prefix owl: <http://www.w3.org/2002/07/owl#> .
            @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
            @prefix ex: <http://example.org/grid#> .
            ex:A a owl:Class .
            ex:B a owl:Class .
            ex:Holder a owl:Class ;
                rdfs:subClassOf [ a owl:Restriction ;
                    owl:onProperty ex:target ;
                    owl:allValuesFrom [ a owl:Class ; owl:unionOf ( ex:A ex:B ) ] ] .
        "#,
        );
        assert_eq!(
            catalog.get("Holder").unwrap().object_properties.get("Target"),
            Some(&ObjectType::Unknown)
        );
        assert_eq!(
            diagnostics,
            vec![Diagnostic::AmbiguousType {
                class: "Holder".to_string(),
                property: "Target".to_string(),
                candidates: vec!["A".to_string(), "B".to_string()],
            }]
        );
    }

    #[test]
    fn test_property_without_identifier_is_skipped() {
        let (catalog, diagnostics) = extract(
            r#"
            @prefix owl: <http://www.w3.org/2002/07/owl#> .
            @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
            @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
            @prefix ex: <http://example.org/grid#> .
            ex:Holder a owl:Class ;
                rdfs:subClassOf [ a owl:Restriction ;
                    owl:onProperty <http://example.org/grid#> ;
                    owl:allValuesFrom xsd:string ] ,
                [ a owl:Restriction ;
                    owl:onProperty <http://example.org/grid#Holder.> ;
                    owl:allValuesFrom xsd:boolean ] ,
                [ a owl:Restriction ;
                    owl:onProperty ex:Holder.label ;
                    owl:allValuesFrom xsd:string ] .
        "#,
        );
        let holder = catalog.get("Holder").unwrap();
        assert_eq!(holder.data_properties.keys().collect::<Vec<_>>(), vec!["Label"]);
        assert!(!holder.data_properties.contains_key(""));
        assert!(holder.object_properties.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_first_declaration_wins_across_maps() {
        let class = Term::NamedNode(CLASS.into_owned());
        let restriction = Term::NamedNode(RESTRICTION.into_owned());
        let holder = iri("Holder");
        let engine = iri("Engine");
        let (r1, r2, r3) = (iri("r1"), iri("r2"), iri("r3"));
        let prop = iri("Holder.part");
        let mut triples = OrderedTriples::default();
        triples
            .add(&holder, TYPE, &class)
            .add(&engine, TYPE, &class)
            .add(&holder, SUB_CLASS_OF, &r1)
            .add(&holder, SUB_CLASS_OF, &r2)
            .add(&holder, SUB_CLASS_OF, &r3)
            .add(&r1, TYPE, &restriction)
            .add(&r1, ON_PROPERTY, &prop)
            .add(&r1, ALL_VALUES_FROM, &engine)
            .add(&r2, TYPE, &restriction)
            .add(&r2, ON_PROPERTY, &prop)
            .add(&r2, ALL_VALUES_FROM, &Term::NamedNode(XSD_STRING.into_owned()))
            .add(&r3, TYPE, &restriction)
            .add(&r3, ON_PROPERTY, &iri("Holder.flag"))
            .add(&r3, ALL_VALUES_FROM, &Term::NamedNode(XSD_BOOLEAN.into_owned()));

        let mut diagnostics = vec![];
        let mut catalog = build_catalog(&triples, &mut diagnostics);
        extract_properties(&mut catalog, &triples, &mut diagnostics);
        let info = catalog.get("Holder").unwrap();
        assert_eq!(
            info.object_properties.get("Part"),
            Some(&ObjectType::Class("Engine".to_string()))
        );
        assert!(!info.data_properties.contains_key("Part"));
        assert_eq!(info.data_properties.get("Flag"), Some(&ScalarKind::Boolean));
    }
}
