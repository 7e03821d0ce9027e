//! Content signatures for the suspicious-content rule.
//!
//! Rules are data: an ordered table of `{id, matcher}` entries evaluated in order,
//! the first matching rule names the verdict. New signatures are added to
//! [`ContentRules::new`] without touching the engine.

use regex::{Regex, RegexBuilder};

/// Minimum number of invisible characters that counts as a formatting flood.
pub const INVISIBLE_CHAR_LIMIT: usize = 10;

/// Zero-width and otherwise invisible characters used to dodge filters.
fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200F}' | '\u{2060}'..='\u{2064}' | '\u{FEFF}' | '\u{180E}' | '\u{00AD}'
    )
}

/// How a rule decides whether content matches.
#[derive(Debug)]
pub enum RuleMatcher {
    /// Case-insensitive regular expression.
    Pattern(Regex),
    /// At least `min` invisible characters anywhere in the content.
    InvisibleChars { min: usize },
    /// More than `more_than` links in the content.
    LinkCount { pattern: Regex, more_than: usize },
}

impl RuleMatcher {
    fn matches(&self, content: &str) -> bool {
        match self {
            RuleMatcher::Pattern(regex) => regex.is_match(content),
            RuleMatcher::InvisibleChars { min } => {
                content.chars().filter(|c| is_invisible(*c)).count() >= *min
            }
            RuleMatcher::LinkCount { pattern, more_than } => {
                pattern.find_iter(content).count() > *more_than
            }
        }
    }
}

/// A named content signature.
#[derive(Debug)]
pub struct ContentRule {
    pub id: &'static str,
    pub matcher: RuleMatcher,
}

/// Ordered table of content signatures.
#[derive(Debug)]
pub struct ContentRules {
    rules: Vec<ContentRule>,
}

fn pattern(source: &str) -> Result<RuleMatcher, regex::Error> {
    RegexBuilder::new(source)
        .case_insensitive(true)
        .build()
        .map(RuleMatcher::Pattern)
}

impl ContentRules {
    /// Builds the default signature table.
    ///
    /// # Arguments
    /// - `link_limit` - A message with more links than this is suspicious
    ///
    /// # Returns
    /// - `Ok(ContentRules)` - All patterns compiled
    /// - `Err(regex::Error)` - A pattern failed to compile
    pub fn new(link_limit: usize) -> Result<Self, regex::Error> {
        let rules = vec![
            ContentRule {
                id: "invite_link",
                matcher: pattern(r"(?:discord\.gg|discord(?:app)?\.com/invite|dsc\.gg)/[a-z0-9-]+")?,
            },
            ContentRule {
                id: "free_nitro",
                matcher: pattern(r"free\s*(?:discord\s*)?nitro")?,
            },
            ContentRule {
                id: "gift_scam",
                matcher: pattern(
                    r"(?:claim|grab)\s+your\s+(?:free\s+)?(?:nitro|gift)|you(?:'ve| have) been gifted|(?:nitro|steam)\s+(?:gift\s+)?giveaway|free\s+gift\s+(?:card|link)",
                )?,
            },
            ContentRule {
                id: "scam_domain",
                matcher: pattern(
                    r"\b(?:dlscord|disc0rd|d1scord|discorcl|discrod|disocrd)\.[a-z]{2,}|\bdiscord-?(?:gift|nitro|give)s?\.[a-z]{2,}|\bdiscord-app\.[a-z]{2,}|steamcommunlty|stearncommunity|steamcornmunity",
                )?,
            },
            ContentRule {
                id: "everyone_bait",
                matcher: pattern(r"(?s)@everyone.*(?:nitro|free|gift)|(?:nitro|free|gift).*@everyone")?,
            },
            ContentRule {
                id: "crypto_scam",
                matcher: pattern(
                    r"\bfree\s+(?:crypto|bitcoin|btc|eth|usdt|nft)s?\b|\b(?:claim|join)\s+(?:the|your|this)\s+airdrop|airdrop\s+(?:is\s+)?(?:live|now)|(?:double|2x)\s+your\s+(?:crypto|btc|eth|bitcoin)",
                )?,
            },
            ContentRule {
                id: "invisible_chars",
                matcher: RuleMatcher::InvisibleChars {
                    min: INVISIBLE_CHAR_LIMIT,
                },
            },
            ContentRule {
                id: "link_flood",
                matcher: RuleMatcher::LinkCount {
                    pattern: Regex::new(r"https?://\S+")?,
                    more_than: link_limit,
                },
            },
            ContentRule {
                id: "pipe_flood",
                matcher: pattern(r"\|{20,}")?,
            },
        ];

        Ok(Self { rules })
    }

    /// Returns the id of the first rule the content matches.
    pub fn find_match(&self, content: &str) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(content))
            .map(|rule| rule.id)
    }
}
