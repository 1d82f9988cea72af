use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A serialization `rdfload` knows how to hand to a grammar parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RdfFormat {
    RdfXml,
    Turtle,
}

#[derive(derive_more::Error, derive_more::Display, Debug, Clone, PartialEq, Eq)]
#[display("unknown RDF format name: `{_0}`")]
pub struct UnknownFormatName(#[error(not(source))] pub String);

impl RdfFormat {
    pub fn name(self) -> &'static str {
        match self {
            RdfFormat::RdfXml => "RDF/XML",
            RdfFormat::Turtle => "Turtle",
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "rdf" | "xml" | "owl" | "rdfs" => Some(RdfFormat::RdfXml),
            "ttl" | "turtle" => Some(RdfFormat::Turtle),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Guesses the format from the first significant bytes of a document.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
        let start = data.iter().position(|b| !b.is_ascii_whitespace())?;
        let data = &data[start..];

        match data {
            [b'<', b'?' | b'!', ..] => Some(RdfFormat::RdfXml),
            [b'<', rest @ ..] if looks_like_start_tag(rest) => Some(RdfFormat::RdfXml),
            [b'<', ..] | [b'@' | b'#' | b'[' | b'(', ..] | [b'_', b':', ..] => {
                Some(RdfFormat::Turtle)
            }
            _ if starts_with_keyword(data, b"PREFIX") || starts_with_keyword(data, b"BASE") => {
                Some(RdfFormat::Turtle)
            }
            _ => None,
        }
    }
}

// An RDF/XML document opens with a start tag whose name is followed by
// whitespace (its namespace declarations) or `/>`. A name followed directly
// by `>` is read as a Turtle IRI reference, such as `<s>` or `<urn:ex:s>`.
fn looks_like_start_tag(rest: &[u8]) -> bool {
    let Some((&first, _)) = rest.split_first() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == b'_' || first >= 0x80) {
        return false;
    }

    let name_len = rest
        .iter()
        .position(|&b| {
            !(b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.' | b':') || b >= 0x80)
        })
        .unwrap_or(rest.len());

    match &rest[name_len..] {
        [] => false,
        [b'/', b'>', ..] => true,
        [b, ..] => b.is_ascii_whitespace(),
    }
}

fn starts_with_keyword(data: &[u8], keyword: &[u8]) -> bool {
    data.len() > keyword.len()
        && data[..keyword.len()].eq_ignore_ascii_case(keyword)
        && data[keyword.len()].is_ascii_whitespace()
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RdfFormat {
    type Err = UnknownFormatName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xml" | "rdf" | "rdfxml" | "rdf/xml" | "rdf+xml" => Ok(RdfFormat::RdfXml),
            "ttl" | "turtle" => Ok(RdfFormat::Turtle),
            _ => Err(UnknownFormatName(s.to_string())),
        }
    }
}
