use std::path::PathBuf;

use itertools::Itertools;
use oxrdf::Graph;
use oxrdf::vocab::rdf;
use tempfile::TempDir;

#[allow(unused)]
pub const SWITCH_INFO_ID: &str = "_AB16765A-B19E-4454-A58F-868D23C6CD26";

#[allow(unused)]
pub const XML_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:cim="http://iec.ch/TC57/2013/CIM-schema-cim16#"
         xmlns:cyme="http://www.cyme.com/CIM/1.0.2#"
         xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" >
    <cim:SwitchInfo rdf:ID="_AB16765A-B19E-4454-A58F-868D23C6CD26" />
</rdf:RDF>"#;

#[allow(unused)]
pub const TTL_SAMPLE: &str = r#"<#_AB16765A-B19E-4454-A58F-868D23C6CD26> a <http://iec.ch/TC57/2013/CIM-schema-cim16#SwitchInfo> .
"#;

/// Writes `content` to `name` in a fresh temporary directory.
///
/// The directory (and the file) goes away when the returned [`TempDir`] is dropped.
#[allow(unused)]
pub fn write_fixture(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

#[allow(unused)]
pub fn serialize_graph(graph: &Graph) -> String {
    // blank node labels differ between parses, so canonicalize them first
    let idents = rdf_canon::issue_graph_with::<sha2::Sha256>(graph, &Default::default()).unwrap();
    let graph = rdf_canon::relabel_graph(graph, &idents).unwrap();

    let mut output = Vec::new();
    let mut ttl = oxttl::TurtleSerializer::new().for_writer(&mut output);
    for triple in graph.iter().sorted_by_cached_key(|t| {
        (
            t.subject.to_string(),
            if t.predicate == rdf::TYPE {
                // make "a" come first
                None
            } else {
                Some(t.predicate.to_string())
            },
            t.object.to_string(),
        )
    }) {
        ttl.serialize_triple(triple).unwrap();
    }

    ttl.finish().unwrap();

    String::from_utf8_lossy(&output).into_owned()
}
