//! E-utilities XML parsers using quick-xml
//!
//! Streaming parsers for `eSearchResult` and `PubmedArticleSet` documents.
//! Elements the harvester does not need are skipped whole, so nested
//! elements with reused names (`Count` inside `TranslationStack`, `PMID`
//! inside `CommentsCorrectionsList`) never leak into the result.

use anyhow::{Context, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::EntrezError;

/// One esearch window: total match count plus the identifiers in the window.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchPage {
    pub count: usize,
    pub ids: Vec<String>,
}

/// The parts of a `<PubmedArticle>` the harvester keeps.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchedArticle {
    pub pmid: Option<String>,
    pub title: Option<String>,
    /// `AbstractText` segments in document order (one per label in structured abstracts)
    pub abstract_segments: Vec<String>,
}

fn new_reader(xml: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(xml);
    // Whitespace next to inline markup (<i>, <sup>) is significant.
    reader.config_mut().trim_text(false);
    reader
}

/// Parse an esearch response.
pub fn parse_esearch(xml: &str) -> Result<SearchPage> {
    let mut reader = new_reader(xml);
    let mut buf = Vec::new();

    let mut count_raw = None;
    let mut ids = Vec::new();
    let mut error = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"eSearchResult" => {
                parse_esearch_result(&mut reader, &mut count_raw, &mut ids, &mut error)?;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e).context("XML parse error in esearch response"),
            _ => {}
        }
        buf.clear();
    }

    if let Some(msg) = error {
        return Err(EntrezError::Api(msg).into());
    }

    let raw = count_raw.unwrap_or_default();
    let count = raw
        .parse::<usize>()
        .map_err(|_| EntrezError::InvalidCount(raw.clone()))?;

    Ok(SearchPage { count, ids })
}

fn parse_esearch_result(
    reader: &mut Reader<&[u8]>,
    count: &mut Option<String>,
    ids: &mut Vec<String>,
    error: &mut Option<String>,
) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"Count" => *count = Some(read_text_content(reader, b"Count")?),
                b"IdList" => *ids = parse_id_list(reader)?,
                b"ERROR" => *error = Some(read_text_content(reader, b"ERROR")?),
                other => {
                    let name = other.to_vec();
                    skip_element(reader, &name)?;
                }
            },
            Event::End(e) if e.name().as_ref() == b"eSearchResult" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn parse_id_list(reader: &mut Reader<&[u8]>) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"Id" => {
                let id = read_text_content(reader, b"Id")?;
                if !id.is_empty() {
                    ids.push(id);
                }
            }
            Event::End(e) if e.name().as_ref() == b"IdList" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(ids)
}

/// Parse an efetch response into articles, in document order.
///
/// `PubmedBookArticle` entries are ignored.
pub fn parse_efetch(xml: &str) -> Result<Vec<FetchedArticle>> {
    let mut reader = new_reader(xml);
    let mut buf = Vec::new();
    let mut articles = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"PubmedArticle" => articles.push(parse_article(&mut reader)?),
                b"PubmedBookArticle" => skip_element(&mut reader, b"PubmedBookArticle")?,
                b"ERROR" => {
                    let msg = read_text_content(&mut reader, b"ERROR")?;
                    return Err(EntrezError::Api(msg).into());
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e).context("XML parse error in efetch response"),
            _ => {}
        }
        buf.clear();
    }

    Ok(articles)
}

fn parse_article(reader: &mut Reader<&[u8]>) -> Result<FetchedArticle> {
    let mut article = FetchedArticle::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"MedlineCitation" => parse_medline_citation(reader, &mut article)?,
                other => {
                    let name = other.to_vec();
                    skip_element(reader, &name)?;
                }
            },
            Event::End(e) if e.name().as_ref() == b"PubmedArticle" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(article)
}

fn parse_medline_citation(reader: &mut Reader<&[u8]>, article: &mut FetchedArticle) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"PMID" => article.pmid = Some(read_text_content(reader, b"PMID")?),
                b"Article" => parse_article_element(reader, article)?,
                other => {
                    let name = other.to_vec();
                    skip_element(reader, &name)?;
                }
            },
            Event::End(e) if e.name().as_ref() == b"MedlineCitation" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn parse_article_element(reader: &mut Reader<&[u8]>, article: &mut FetchedArticle) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"ArticleTitle" => {
                    article.title = Some(read_text_content(reader, b"ArticleTitle")?)
                }
                b"Abstract" => article.abstract_segments = parse_abstract(reader)?,
                other => {
                    let name = other.to_vec();
                    skip_element(reader, &name)?;
                }
            },
            Event::Empty(e) if e.name().as_ref() == b"ArticleTitle" => {
                article.title = Some(String::new());
            }
            Event::End(e) if e.name().as_ref() == b"Article" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn parse_abstract(reader: &mut Reader<&[u8]>) -> Result<Vec<String>> {
    let mut buf = Vec::new();
    let mut segments = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"AbstractText" => {
                segments.push(read_text_content(reader, b"AbstractText")?);
            }
            Event::Empty(e) if e.name().as_ref() == b"AbstractText" => segments.push(String::new()),
            Event::End(e) if e.name().as_ref() == b"Abstract" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(segments)
}

fn skip_element(reader: &mut Reader<&[u8]>, end_tag: &[u8]) -> Result<()> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(_) => depth += 1,
            Event::End(e) => {
                depth -= 1;
                if depth == 0 && e.name().as_ref() == end_tag {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Read text content of a specific element, flattening nested tags, trimmed
fn read_text_content(reader: &mut Reader<&[u8]>, end_tag: &[u8]) -> Result<String> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e)),
            Event::Start(_) => depth += 1,
            Event::End(e) => {
                depth -= 1;
                if depth == 0 && e.name().as_ref() == end_tag {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(text.trim().to_string())
}
