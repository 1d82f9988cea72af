//! Loads RDF/XML and Turtle documents into an [`oxrdf::Graph`], resolving
//! relative IRIs against a caller-supplied public ID.
//!
//! An explicitly empty public ID is honoured as a base of its own: `rdf:ID="x"`
//! or `<#x>` become the IRI `#x`, rather than being resolved against the
//! location of the document.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

pub use oxrdf::Graph;
use oxrdfxml::{RdfXmlParseError, RdfXmlParser};
use oxttl::{TurtleParseError, TurtleParser};

mod base;
mod format;

pub use base::{EffectiveBase, PublicId};
pub use format::{RdfFormat, UnknownFormatName};

/// Parses the file at `source` into `graph`.
///
/// The format is `format` if given, otherwise it is guessed from the file
/// extension and then from the content. With [`PublicId::Absent`] relative
/// IRIs resolve against the `file:` URL of `source`; with `""` each relative
/// reference is kept exactly as written, dot segments included, and absolute
/// IRIs of any scheme are left alone. A `@base` or `xml:base` inside the
/// document still applies.
///
/// `graph` is only modified if the whole document parses.
pub fn parse(
    source: impl AsRef<Path>,
    format: Option<RdfFormat>,
    public_id: impl Into<PublicId>,
    graph: &mut Graph,
) -> Result<(), Error> {
    let path = source.as_ref();
    let public_id = public_id.into();
    let io_error = |source: std::io::Error| Error::Io {
        source,
        path: Some(path.to_path_buf()),
    };

    let mut reader = BufReader::new(File::open(path).map_err(io_error)?);

    let format = match format.or_else(|| RdfFormat::from_path(path)) {
        Some(format) => format,
        None => RdfFormat::sniff(reader.fill_buf().map_err(io_error)?).ok_or_else(|| {
            Error::Format {
                path: Some(path.to_path_buf()),
            }
        })?,
    };

    let base = EffectiveBase::select(&public_id, Some(path))?;
    log::debug!(
        "parsing {} as {format} (public ID: {:?}, base: {:?})",
        path.display(),
        public_id.as_deref(),
        base.parser_base(),
    );

    load(reader, format, &base, graph).map_err(|e| e.with_path(path))
}

/// Parses an in-memory document into `graph`.
///
/// There is no location to fall back on, so with [`PublicId::Absent`] any
/// relative IRI in the document is a parse error.
pub fn parse_slice(
    data: &[u8],
    format: RdfFormat,
    public_id: impl Into<PublicId>,
    graph: &mut Graph,
) -> Result<(), Error> {
    parse_reader(data, format, public_id, graph)
}

/// Parses a document read from `reader` into `graph`.
pub fn parse_reader(
    reader: impl Read,
    format: RdfFormat,
    public_id: impl Into<PublicId>,
    graph: &mut Graph,
) -> Result<(), Error> {
    let public_id = public_id.into();
    let base = EffectiveBase::select(&public_id, None)?;
    log::debug!(
        "parsing input as {format} (public ID: {:?}, base: {:?})",
        public_id.as_deref(),
        base.parser_base(),
    );

    load(reader, format, &base, graph)
}

fn load(
    mut reader: impl Read,
    format: RdfFormat,
    base: &EffectiveBase,
    graph: &mut Graph,
) -> Result<(), Error> {
    // collect everything first so a failure leaves `graph` untouched
    let parsed = match base {
        EffectiveBase::Empty => {
            let mut data = Vec::new();
            reader
                .read_to_end(&mut data)
                .map_err(|source| Error::Io { source, path: None })?;

            // The grammar parsers normalize dot segments while resolving, so
            // references are only kept as written by a parse without any base.
            // That parse skips validation, which the first pass provides.
            parse_triples(data.as_slice(), format, base.parser_base(), false)?;
            parse_triples(data.as_slice(), format, None, true)?
        }
        EffectiveBase::Unset | EffectiveBase::Iri(_) => {
            parse_triples(reader, format, base.parser_base(), false)?
        }
    };

    log::trace!("committing {} parsed triples", parsed.len());
    for triple in parsed.iter() {
        graph.insert(triple);
    }

    Ok(())
}

fn parse_triples(
    reader: impl Read,
    format: RdfFormat,
    base_iri: Option<&str>,
    unchecked: bool,
) -> Result<Graph, Error> {
    let mut parsed = Graph::new();
    match format {
        RdfFormat::RdfXml => {
            let mut parser = RdfXmlParser::new();
            if let Some(iri) = base_iri {
                parser = parser.with_base_iri(iri).map_err(invalid_base(iri))?;
            }
            if unchecked {
                parser = parser.unchecked();
            }

            for triple in parser.for_reader(reader) {
                parsed.insert(&triple?);
            }
        }
        RdfFormat::Turtle => {
            let mut parser = TurtleParser::new();
            if let Some(iri) = base_iri {
                parser = parser.with_base_iri(iri).map_err(invalid_base(iri))?;
            }
            if unchecked {
                parser = parser.unchecked();
            }

            for triple in parser.for_reader(reader) {
                parsed.insert(&triple?);
            }
        }
    }

    Ok(parsed)
}

fn invalid_base(iri: &str) -> impl FnOnce(oxiri::IriParseError) -> Error + '_ {
    move |source| Error::InvalidBase {
        source,
        iri: iri.to_string(),
    }
}

#[derive(derive_more::Error, derive_more::Display, derive_more::From, Debug)]
pub enum Error {
    #[display("cannot read {}: {source}", describe(path))]
    Io {
        source: std::io::Error,
        path: Option<PathBuf>,
    },

    #[display("cannot determine the RDF format of {}", describe(path))]
    Format { path: Option<PathBuf> },

    #[display("{source}")]
    #[from]
    Parse { source: ParseError },

    #[display("invalid base IRI: `{iri}`")]
    InvalidBase {
        source: oxiri::IriParseError,
        iri: String,
    },
}

/// A syntax error reported by one of the grammar parsers.
#[derive(derive_more::Error, derive_more::Display, derive_more::From, Debug)]
pub enum ParseError {
    #[display("invalid Turtle: {_0}")]
    Turtle(oxttl::TurtleSyntaxError),

    #[display("invalid RDF/XML: {_0}")]
    RdfXml(oxrdfxml::RdfXmlSyntaxError),
}

impl Error {
    fn with_path(self, with: &Path) -> Self {
        match self {
            Error::Io { source, path: None } => Error::Io {
                source,
                path: Some(with.to_path_buf()),
            },
            Error::Format { path: None } => Error::Format {
                path: Some(with.to_path_buf()),
            },
            other => other,
        }
    }
}

impl From<TurtleParseError> for Error {
    fn from(e: TurtleParseError) -> Self {
        match e {
            TurtleParseError::Io(source) => Error::Io { source, path: None },
            TurtleParseError::Syntax(e) => ParseError::from(e).into(),
        }
    }
}

impl From<RdfXmlParseError> for Error {
    fn from(e: RdfXmlParseError) -> Self {
        match e {
            RdfXmlParseError::Io(source) => Error::Io { source, path: None },
            RdfXmlParseError::Syntax(e) => ParseError::from(e).into(),
        }
    }
}

fn describe(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!("`{}`", path.display()),
        None => "input".to_string(),
    }
}
