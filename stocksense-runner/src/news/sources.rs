//! Headline sources: Yahoo Finance search news and Google News RSS.

use std::time::Duration;

use regex::{Captures, Regex};
use reqwest::blocking::RequestBuilder;
use serde::Deserialize;
use tracing::debug;

use super::NewsError;

/// Where headlines for a symbol come from.
pub trait HeadlineSource: Send + Sync {
    fn name(&self) -> &str;

    /// Up to `max` headline titles for `symbol`, most relevant first.
    fn headlines(&self, symbol: &str, max: usize) -> Result<Vec<String>, NewsError>;
}

/// `TCS.NS` -> `TCS`; symbols without an exchange suffix pass through.
pub fn base_symbol(symbol: &str) -> &str {
    symbol.split('.').next().unwrap_or(symbol)
}

fn http_client() -> Result<reqwest::blocking::Client, NewsError> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(15))
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
        .build()
        .map_err(|e| NewsError::Network(format!("failed to build HTTP client: {e}")))
}

fn get_text(request: RequestBuilder) -> Result<String, NewsError> {
    let resp = request
        .send()
        .map_err(|e| NewsError::Network(e.to_string()))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(NewsError::Http {
            status: status.as_u16(),
        });
    }
    resp.text().map_err(|e| NewsError::Network(e.to_string()))
}

const YAHOO_SEARCH_URL: &str = "https://query2.finance.yahoo.com/v1/finance/search";
const GOOGLE_RSS_URL: &str = "https://news.google.com/rss/search";

// ─── Yahoo Finance ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    news: Vec<NewsItem>,
}

#[derive(Debug, Deserialize)]
struct NewsItem {
    title: Option<String>,
}

/// Yahoo Finance search API news.
///
/// Suffixed symbols (`RELIANCE.NS`) often have no news of their own, so an
/// empty answer is retried once with the base symbol.
pub struct YahooNews {
    client: reqwest::blocking::Client,
}

impl YahooNews {
    pub fn new() -> Result<Self, NewsError> {
        Ok(Self {
            client: http_client()?,
        })
    }

    fn search_request(&self, query: &str, max: usize) -> RequestBuilder {
        let count = max.to_string();
        self.client.get(YAHOO_SEARCH_URL).query(&[
            ("q", query),
            ("quotesCount", "0"),
            ("newsCount", count.as_str()),
        ])
    }

    fn parse(body: &str, max: usize) -> Result<Vec<String>, NewsError> {
        let resp: SearchResponse =
            serde_json::from_str(body).map_err(|e| NewsError::Parse(e.to_string()))?;
        Ok(resp
            .news
            .into_iter()
            .filter_map(|item| item.title)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .take(max)
            .collect())
    }

    fn search(&self, query: &str, max: usize) -> Result<Vec<String>, NewsError> {
        let body = get_text(self.search_request(query, max))?;
        Self::parse(&body, max)
    }
}

impl HeadlineSource for YahooNews {
    fn name(&self) -> &str {
        "yahoo_news"
    }

    fn headlines(&self, symbol: &str, max: usize) -> Result<Vec<String>, NewsError> {
        let found = self.search(symbol, max)?;
        let base = base_symbol(symbol);
        if found.is_empty() && base != symbol {
            debug!(symbol, base, "no Yahoo news for suffixed symbol, retrying base");
            return self.search(base, max);
        }
        Ok(found)
    }
}

// ─── Google News RSS ─────────────────────────────────────────────────

/// Google News RSS search for `<base symbol> stock <region>`.
pub struct GoogleNewsRss {
    client: reqwest::blocking::Client,
    region: String,
    title_re: Regex,
    entity_re: Regex,
}

impl GoogleNewsRss {
    pub fn new() -> Result<Self, NewsError> {
        Self::with_region("India")
    }

    pub fn with_region(region: &str) -> Result<Self, NewsError> {
        let title_re = Regex::new(
            r"(?s)<item\b[^>]*>.*?<title>\s*(?:<!\[CDATA\[)?(.*?)(?:\]\]>)?\s*</title>",
        )
        .map_err(|e| NewsError::Parse(e.to_string()))?;
        let entity_re = Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|lt|gt|quot|apos|amp);")
            .map_err(|e| NewsError::Parse(e.to_string()))?;
        Ok(Self {
            client: http_client()?,
            region: region.to_string(),
            title_re,
            entity_re,
        })
    }

    /// Feed request for `<base symbol> stock <region>`.
    pub fn feed_request(&self, symbol: &str) -> RequestBuilder {
        let q = format!("{} stock {}", base_symbol(symbol), self.region);
        self.client.get(GOOGLE_RSS_URL).query(&[("q", q)])
    }

    /// Item titles from an RSS document; the channel's own title is skipped.
    pub fn parse(&self, xml: &str, max: usize) -> Vec<String> {
        self.title_re
            .captures_iter(xml)
            .filter_map(|c| c.get(1))
            .map(|m| self.decode_entities(m.as_str().trim()))
            .filter(|t| !t.is_empty())
            .take(max)
            .collect()
    }

    /// Single pass over named and numeric character references; anything
    /// unrecognised is left as written.
    fn decode_entities(&self, s: &str) -> String {
        self.entity_re
            .replace_all(s, |caps: &Captures| {
                let entity = &caps[1];
                let decoded = match entity {
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "amp" => Some('&'),
                    _ => {
                        let code = match entity.strip_prefix("#x").or(entity.strip_prefix("#X")) {
                            Some(hex) => u32::from_str_radix(hex, 16).ok(),
                            None => entity[1..].parse::<u32>().ok(),
                        };
                        code.and_then(char::from_u32)
                    }
                };
                decoded.map_or_else(|| caps[0].to_string(), String::from)
            })
            .into_owned()
    }
}

impl HeadlineSource for GoogleNewsRss {
    fn name(&self) -> &str {
        "google_news_rss"
    }

    fn headlines(&self, symbol: &str, max: usize) -> Result<Vec<String>, NewsError> {
        let xml = get_text(self.feed_request(symbol))?;
        Ok(self.parse(&xml, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
<title>"TCS stock India" - Google News</title>
<item><title>TCS shares rise after strong Q2 &amp; deal wins - Mint</title><link>x</link></item>
<item>
  <title><![CDATA[TCS slips as IT index falls]]></title>
</item>
<item><title>   </title></item>
</channel></rss>"#;

    #[test]
    fn base_symbol_strips_exchange_suffix() {
        assert_eq!(base_symbol("TCS.NS"), "TCS");
        assert_eq!(base_symbol("AAPL"), "AAPL");
    }

    #[test]
    fn rss_item_titles_only() {
        let source = GoogleNewsRss::new().unwrap();
        let titles = source.parse(RSS, 6);
        assert_eq!(
            titles,
            vec![
                "TCS shares rise after strong Q2 & deal wins - Mint",
                "TCS slips as IT index falls",
            ]
        );
        assert_eq!(source.parse(RSS, 1).len(), 1);
    }

    #[test]
    fn rss_titles_decode_numeric_references() {
        let source = GoogleNewsRss::new().unwrap();
        let titles = source.parse(
            "<item><title>Infosys&#8217;s profit &#x2013; beats estimates</title></item>\
             <item><title>Q3 &#X2014; &amp;#39; stays &#99999999; &nbsp;</title></item>",
            6,
        );
        assert_eq!(
            titles,
            vec![
                "Infosys\u{2019}s profit \u{2013} beats estimates",
                "Q3 \u{2014} &#39; stays &#99999999; &nbsp;",
            ]
        );
    }

    fn query_pairs(request: RequestBuilder) -> Vec<(String, String)> {
        let request = request.build().unwrap();
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn feed_request_uses_base_symbol() {
        let source = GoogleNewsRss::new().unwrap();
        let request = source.feed_request("M&M.NS").build().unwrap();
        assert_eq!(request.url().path(), "/rss/search");
        assert_eq!(request.url().query(), Some("q=M%26M+stock+India"));
        assert_eq!(
            query_pairs(source.feed_request("TCS.NS")),
            vec![("q".to_string(), "TCS stock India".to_string())]
        );
    }

    #[test]
    fn yahoo_search_parsing() {
        let body = r#"{"count":3,"quotes":[],"news":[
            {"uuid":"1","title":"Reliance hits record high"},
            {"uuid":"2"},
            {"uuid":"3","title":"Reliance Jio tariff hike"}]}"#;
        let titles = YahooNews::parse(body, 6).unwrap();
        assert_eq!(titles, vec!["Reliance hits record high", "Reliance Jio tariff hike"]);

        assert!(YahooNews::parse(r#"{"quotes":[]}"#, 6).unwrap().is_empty());
        assert!(matches!(YahooNews::parse("<html>", 6), Err(NewsError::Parse(_))));
    }

    #[test]
    fn search_request_query() {
        let source = YahooNews::new().unwrap();
        let pairs = query_pairs(source.search_request("BAJAJ-AUTO.NS", 6));
        let expected: Vec<(String, String)> = [
            ("q", "BAJAJ-AUTO.NS"),
            ("quotesCount", "0"),
            ("newsCount", "6"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(pairs, expected);
    }
}
