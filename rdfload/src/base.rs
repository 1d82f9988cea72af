use std::path::Path;

use oxiri::Iri;

use crate::Error;

/// Scheme-only base used to validate a document that is parsed with an empty base.
///
/// Every relative reference resolves against it, so a document that parses
/// with it is well formed. Its output is discarded.
pub(crate) const EMPTY_BASE_PLACEHOLDER: &str = "x-rdfload-empty-base:";

/// The public ID (base IRI) a caller supplies for a parse.
///
/// `Present("")` is a real base: relative references resolve to themselves.
/// It is never treated like `Absent`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum PublicId {
    #[default]
    Absent,
    Present(String),
}

impl PublicId {
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            PublicId::Absent => None,
            PublicId::Present(iri) => Some(iri),
        }
    }
}

impl From<&str> for PublicId {
    fn from(iri: &str) -> Self {
        PublicId::Present(iri.to_string())
    }
}

impl From<String> for PublicId {
    fn from(iri: String) -> Self {
        PublicId::Present(iri)
    }
}

impl From<Option<&str>> for PublicId {
    fn from(iri: Option<&str>) -> Self {
        iri.map_or(PublicId::Absent, PublicId::from)
    }
}

impl From<Option<String>> for PublicId {
    fn from(iri: Option<String>) -> Self {
        iri.map_or(PublicId::Absent, PublicId::Present)
    }
}

/// The base a parse actually resolves relative references against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectiveBase {
    /// No base at all; relative references are a syntax error.
    Unset,
    /// The explicit empty base; a relative reference `R` resolves to `R`.
    Empty,
    Iri(Iri<String>),
}

impl EffectiveBase {
    /// Picks the base for a parse of `source` (`None` for in-memory input).
    ///
    /// An absent public ID falls back to the `file:` URL of the source.
    pub fn select(public_id: &PublicId, source: Option<&Path>) -> Result<Self, Error> {
        match public_id {
            PublicId::Present(iri) if iri.is_empty() => Ok(EffectiveBase::Empty),
            PublicId::Present(iri) => parse_base(iri.clone()),
            PublicId::Absent => match source {
                Some(path) => Self::from_path(path),
                None => Ok(EffectiveBase::Unset),
            },
        }
    }

    fn from_path(path: &Path) -> Result<Self, Error> {
        let absolute = std::path::absolute(path).map_err(|source| Error::Io {
            source,
            path: Some(path.to_path_buf()),
        })?;

        match url::Url::from_file_path(&absolute) {
            Ok(url) => parse_base(url.into()),
            Err(()) => {
                log::debug!("no file URL for {}, parsing without a base", absolute.display());
                Ok(EffectiveBase::Unset)
            }
        }
    }

    /// The base IRI to configure on the checking grammar parser, if any.
    pub(crate) fn parser_base(&self) -> Option<&str> {
        match self {
            EffectiveBase::Unset => None,
            EffectiveBase::Empty => Some(EMPTY_BASE_PLACEHOLDER),
            EffectiveBase::Iri(iri) => Some(iri.as_str()),
        }
    }
}

fn parse_base(iri: String) -> Result<EffectiveBase, Error> {
    match Iri::parse(iri.clone()) {
        Ok(iri) => Ok(EffectiveBase::Iri(iri)),
        Err(source) => Err(Error::InvalidBase { source, iri }),
    }
}
