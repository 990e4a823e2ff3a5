//! Lexicon sentiment scoring for headlines.
//!
//! Valence-aware and rule-based: each known word carries a valence on a
//! -4..+4 scale, boosted or damped by preceding intensifiers, flipped by a
//! negation in the three words before it, emphasised when shouted in caps,
//! and reweighted around "but". The summed valence is squashed into [-1, 1]
//! with `x / sqrt(x^2 + 15)`.

use std::collections::HashMap;

/// Text in, polarity in [-1, 1] out.
pub trait SentimentScorer: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

const NORMALIZATION_ALPHA: f64 = 15.0;
const BOOST_INCREMENT: f64 = 0.293;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;

const LEXICON: &[(&str, f64)] = &[
    // positive
    ("gain", 2.0), ("gains", 2.0), ("gained", 2.0), ("surge", 2.2), ("surges", 2.2),
    ("surged", 2.2), ("soar", 2.5), ("soars", 2.5), ("soared", 2.5), ("jump", 1.6),
    ("jumps", 1.6), ("jumped", 1.6), ("rally", 2.0), ("rallies", 2.0), ("rise", 1.4),
    ("rises", 1.4), ("rising", 1.4), ("rose", 1.4), ("climb", 1.3), ("climbs", 1.3),
    ("record", 1.2), ("high", 0.9), ("highs", 0.9), ("profit", 1.9), ("profits", 1.9),
    ("profitable", 2.0), ("beat", 1.6), ("beats", 1.6), ("strong", 2.1),
    ("stronger", 2.0), ("growth", 1.9), ("grow", 1.6), ("grows", 1.6), ("upgrade", 2.0),
    ("upgraded", 2.0), ("upgrades", 2.0), ("bullish", 2.4), ("outperform", 2.0),
    ("outperforms", 2.0), ("buy", 1.1), ("win", 2.8), ("wins", 2.7), ("won", 2.7),
    ("boost", 1.7), ("boosts", 1.7), ("boosted", 1.7), ("positive", 2.6),
    ("good", 1.9), ("great", 3.1), ("best", 3.2), ("success", 2.7),
    ("successful", 2.8), ("optimistic", 2.3), ("optimism", 2.5), ("recovery", 1.6),
    ("recovers", 1.6), ("rebound", 1.5), ("rebounds", 1.5), ("approval", 2.2),
    ("approved", 1.8), ("expansion", 1.3), ("dividend", 1.0), ("upbeat", 2.0),
    ("robust", 1.7), ("confident", 2.2), ("confidence", 2.3), ("opportunity", 1.8),
    ("benefit", 2.0), ("benefits", 2.0), ("improve", 1.9), ("improved", 2.1),
    ("improves", 1.9),
    // negative
    ("loss", -1.9), ("losses", -1.9), ("lose", -1.7), ("loses", -1.7), ("lost", -1.3),
    ("fall", -1.5), ("falls", -1.5), ("fell", -1.5), ("falling", -1.5), ("drop", -1.1),
    ("drops", -1.1), ("dropped", -1.1), ("decline", -1.5), ("declines", -1.5),
    ("declined", -1.5), ("plunge", -2.4), ("plunges", -2.4), ("plunged", -2.4),
    ("slump", -2.0), ("slumps", -2.0), ("crash", -2.5), ("crashes", -2.5),
    ("tumble", -2.0), ("tumbles", -2.0), ("sink", -1.6), ("sinks", -1.6), ("slide", -1.2),
    ("slides", -1.2), ("weak", -1.9), ("weaker", -1.9), ("weakness", -1.8),
    ("miss", -1.3), ("misses", -1.3), ("missed", -1.3), ("downgrade", -2.0),
    ("downgraded", -2.0), ("downgrades", -2.0), ("bearish", -2.4),
    ("underperform", -2.0), ("sell", -0.9), ("selloff", -2.0), ("fraud", -3.0),
    ("scam", -2.9), ("probe", -1.2), ("lawsuit", -1.7), ("penalty", -2.0),
    ("fine", -0.8), ("fined", -1.8), ("debt", -1.5), ("default", -2.1),
    ("bankrupt", -2.8), ("bankruptcy", -2.8), ("warning", -1.4), ("warns", -1.4),
    ("risk", -1.1), ("risks", -1.1), ("fear", -2.2), ("fears", -2.2),
    ("concern", -1.4), ("concerns", -1.4), ("worry", -1.9), ("worries", -1.9),
    ("bad", -2.5), ("worst", -3.1), ("negative", -2.7), ("cut", -1.1), ("cuts", -1.1),
    ("layoffs", -1.9), ("crisis", -3.1), ("volatile", -1.2), ("pressure", -1.2),
    ("slowdown", -1.6), ("halt", -1.3), ("halted", -1.3), ("fail", -2.3),
    ("fails", -2.3), ("failed", -2.3), ("failure", -2.3), ("pessimistic", -2.3),
];

const BOOSTERS: &[(&str, f64)] = &[
    ("very", BOOST_INCREMENT), ("extremely", BOOST_INCREMENT), ("sharply", BOOST_INCREMENT),
    ("significantly", BOOST_INCREMENT), ("hugely", BOOST_INCREMENT),
    ("massive", BOOST_INCREMENT), ("strongly", BOOST_INCREMENT), ("most", BOOST_INCREMENT),
    ("more", BOOST_INCREMENT), ("record-breaking", BOOST_INCREMENT),
    ("slightly", -BOOST_INCREMENT), ("marginally", -BOOST_INCREMENT),
    ("somewhat", -BOOST_INCREMENT), ("barely", -BOOST_INCREMENT),
    ("modestly", -BOOST_INCREMENT), ("less", -BOOST_INCREMENT),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nor", "neither", "without", "cannot", "isn't",
    "aren't", "wasn't", "weren't", "don't", "doesn't", "didn't", "won't", "can't",
    "hasn't", "haven't", "hadn't", "shouldn't", "wouldn't", "couldn't", "nothing",
];

#[derive(Debug, Clone)]
pub struct LexiconScorer {
    lexicon: HashMap<String, f64>,
    boosters: HashMap<String, f64>,
    negations: Vec<String>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        let lexicon = LEXICON.iter().map(|&(w, v)| (w.to_string(), v)).collect();
        let boosters = BOOSTERS.iter().map(|&(w, v)| (w.to_string(), v)).collect();
        let negations = NEGATIONS.iter().map(|s| s.to_string()).collect();
        Self {
            lexicon,
            boosters,
            negations,
        }
    }

    /// Add or override a word's valence (-4..+4).
    pub fn with_word(mut self, word: &str, valence: f64) -> Self {
        self.lexicon.insert(word.to_lowercase(), valence);
        self
    }

    /// Sum of adjusted word valences, before normalisation.
    fn raw_valence(&self, text: &str) -> f64 {
        let tokens: Vec<&str> = text
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-'))
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            return 0.0;
        }
        let lower: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let mixed_case = tokens.iter().any(|t| !is_shouted(t)) && tokens.iter().any(|t| is_shouted(t));

        let mut valences = vec![0.0; tokens.len()];
        for (i, word) in lower.iter().enumerate() {
            let Some(&base) = self.lexicon.get(word) else {
                continue;
            };
            let mut v = base;
            if mixed_case && is_shouted(tokens[i]) {
                v += CAPS_INCREMENT * v.signum();
            }
            for back in 1..=3 {
                let Some(j) = i.checked_sub(back) else {
                    break;
                };
                if let Some(&boost) = self.boosters.get(&lower[j]) {
                    // boosts fade with distance
                    let fade = [1.0, 0.95, 0.9][back - 1];
                    v += boost * v.signum() * fade;
                }
                if self.negations.contains(&lower[j]) || lower[j].ends_with("n't") {
                    v *= NEGATION_SCALAR;
                }
            }
            valences[i] = v;
        }

        if let Some(pivot) = lower.iter().position(|w| w == "but") {
            for (i, v) in valences.iter_mut().enumerate() {
                if i < pivot {
                    *v *= 0.5;
                } else if i > pivot {
                    *v *= 1.5;
                }
            }
        }

        let sum: f64 = valences.iter().sum();
        if sum == 0.0 {
            return 0.0;
        }
        let bangs = text.matches('!').count().min(MAX_EXCLAMATIONS) as f64;
        sum + bangs * EXCLAMATION_INCREMENT * sum.signum()
    }
}

impl SentimentScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let x = self.raw_valence(text);
        (x / (x * x + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
    }
}

fn is_shouted(token: &str) -> bool {
    token.chars().any(|c| c.is_alphabetic()) && !token.chars().any(|c| c.is_lowercase())
}
