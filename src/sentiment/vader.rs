//! Lexicon-based compound polarity, VADER style.
//!
//! Token valences from the lexicon are adjusted for intensity boosters,
//! ALL-CAPS emphasis, preceding negations and "but" contrast, summed,
//! bumped by exclamation/question emphasis and squashed into [-1, 1]
//! with `x / sqrt(x² + ALPHA)`.

use super::lexicon::Lexicon;
use super::PolarityModel;

/// Normalisation constant; approximates the max expected raw sum.
const ALPHA: f64 = 15.0;

/// Booster/dampener increment.
const B_INCR: f64 = 0.293;
const B_DECR: f64 = -0.293;

/// Emphasis added to an ALL-CAPS sentiment word in mixed-case text.
const C_INCR: f64 = 0.733;

/// Scale applied to a valence when a negation precedes it.
const N_SCALAR: f64 = -0.74;

/// How many preceding tokens can modify a sentiment word.
const WINDOW: usize = 3;

const BOOSTERS: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerably",
    "decidedly", "deeply", "enormously", "entirely", "especially",
    "exceptionally", "extremely", "fully", "greatly", "highly", "hugely",
    "incredibly", "intensely", "majorly", "massively", "more", "most",
    "particularly", "purely", "quite", "really", "remarkably", "sharply",
    "so", "substantially", "thoroughly", "totally", "tremendously", "very",
];

const DAMPENERS: &[&str] = &[
    "almost", "barely", "hardly", "less", "little", "marginally",
    "occasionally", "partly", "scarcely", "slightly", "somewhat",
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor",
    "nowhere", "cannot", "cant", "dont", "doesnt", "didnt", "isnt", "arent",
    "wasnt", "werent", "wont", "wouldnt", "shouldnt", "couldnt", "hasnt",
    "havent", "hadnt", "aint", "without", "rarely", "seldom", "despite",
];

pub struct VaderModel {
    lexicon: Lexicon,
}

impl VaderModel {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Raw (unnormalised) sum of adjusted valences plus punctuation emphasis.
    fn raw_sum(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }
        let cap_diff = is_cap_diff(&tokens);
        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();

        let mut valences: Vec<f64> = (0..tokens.len())
            .map(|i| self.token_valence(i, &tokens, &lowered, cap_diff))
            .collect();

        apply_but_rule(&lowered, &mut valences);

        let sum: f64 = valences.iter().sum();
        if sum == 0.0 {
            return 0.0;
        }
        let emphasis = punctuation_emphasis(text);
        if sum > 0.0 {
            sum + emphasis
        } else {
            sum - emphasis
        }
    }

    fn token_valence(&self, i: usize, tokens: &[String], lowered: &[String], cap_diff: bool) -> f64 {
        let lower = &lowered[i];
        if booster_scalar(lower) != 0.0 {
            return 0.0;
        }
        // "kind of" is a dampener phrase, not sentiment
        if lower == "kind" && lowered.get(i + 1).map(String::as_str) == Some("of") {
            return 0.0;
        }

        let Some(mut valence) = self.lexicon.get(lower) else {
            return 0.0;
        };

        if cap_diff && is_all_caps(&tokens[i]) {
            valence += C_INCR.copysign(valence);
        }

        for step in 0..WINDOW {
            if i <= step {
                break;
            }
            let j = i - (step + 1);
            let prev = &lowered[j];
            if !self.lexicon.contains(prev) {
                let mut s = scalar_inc_dec(prev, valence, cap_diff && is_all_caps(&tokens[j]));
                match step {
                    1 => s *= 0.95,
                    2 => s *= 0.9,
                    _ => {}
                }
                valence += s;
            }
            if is_negation(prev) {
                valence *= N_SCALAR;
            }
        }

        valence
    }
}

impl PolarityModel for VaderModel {
    fn polarity(&self, text: &str) -> f64 {
        normalize(self.raw_sum(text))
    }
}

/// Squash a raw sum into [-1, 1]. A non-finite sum scores 0.0.
pub fn normalize(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    let norm = score / (score * score + ALPHA).sqrt();
    norm.clamp(-1.0, 1.0)
}

/// Split on whitespace and strip surrounding punctuation. Single
/// characters are dropped, apostrophes removed so "don't" == "dont".
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .replace(['\'', '\u{2019}'], "")
        })
        .filter(|w| w.chars().count() > 1)
        .collect()
}

fn is_all_caps(token: &str) -> bool {
    token.chars().any(char::is_alphabetic)
        && token
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase)
}

/// True when some, but not all, tokens are shouted.
fn is_cap_diff(tokens: &[String]) -> bool {
    let caps = tokens.iter().filter(|t| is_all_caps(t)).count();
    caps > 0 && caps < tokens.len()
}

fn is_negation(lower: &str) -> bool {
    NEGATIONS.contains(&lower)
}

fn booster_scalar(lower: &str) -> f64 {
    if BOOSTERS.contains(&lower) {
        B_INCR
    } else if DAMPENERS.contains(&lower) {
        B_DECR
    } else {
        0.0
    }
}

/// Intensity change a preceding booster/dampener applies to `valence`.
fn scalar_inc_dec(lower: &str, valence: f64, shouted: bool) -> f64 {
    let mut scalar = booster_scalar(lower);
    if scalar == 0.0 {
        return 0.0;
    }
    if valence < 0.0 {
        scalar = -scalar;
    }
    if shouted {
        scalar += C_INCR.copysign(valence);
    }
    scalar
}

/// Sentiment before the first "but" is halved, after it boosted by half.
fn apply_but_rule(lowered: &[String], valences: &mut [f64]) {
    let Some(idx) = lowered.iter().position(|t| t == "but") else {
        return;
    };
    for (i, v) in valences.iter_mut().enumerate() {
        if i < idx {
            *v *= 0.5;
        } else if i > idx {
            *v *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let ep = text.matches('!').count().min(4) as f64 * 0.292;
    let qm = text.matches('?').count();
    let qm = match qm {
        0 | 1 => 0.0,
        2 | 3 => qm as f64 * 0.18,
        _ => 0.96,
    };
    ep + qm
}
