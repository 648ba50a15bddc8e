//! Sentiment lexicon.
//!
//! Maps lower-cased tokens to a valence on VADER's -4.0..=4.0 scale.
//! A compact built-in lexicon covers general tone plus market and
//! crypto vocabulary; a full VADER lexicon file can be loaded instead.

use std::collections::HashMap;

use crate::types::MonitorError;

/// Built-in valences. General-purpose entries follow VADER's ratings;
/// market and crypto terms are rated on the same scale.
const BUILTIN: &[(&str, f64)] = &[
    // General positive
    ("good", 1.9),
    ("great", 3.1),
    ("excellent", 2.7),
    ("best", 3.2),
    ("better", 1.9),
    ("positive", 2.6),
    ("happy", 2.7),
    ("love", 3.2),
    ("like", 1.5),
    ("hope", 1.9),
    ("hopeful", 2.3),
    ("optimistic", 2.3),
    ("optimism", 2.5),
    ("confident", 2.2),
    ("confidence", 2.3),
    ("success", 2.7),
    ("successful", 2.8),
    ("win", 2.8),
    ("wins", 2.7),
    ("winning", 2.4),
    ("won", 2.7),
    ("strong", 2.3),
    ("stronger", 2.1),
    ("strength", 2.2),
    ("support", 1.7),
    ("growth", 1.6),
    ("grow", 1.4),
    ("improve", 1.9),
    ("improved", 2.1),
    ("boost", 1.7),
    ("benefit", 2.0),
    ("opportunity", 1.8),
    ("opportunities", 1.6),
    ("safe", 1.9),
    ("secure", 1.4),
    ("stable", 1.2),
    ("innovative", 2.0),
    ("approve", 1.8),
    ("approved", 1.8),
    ("approval", 1.5),
    ("welcome", 2.0),
    ("celebrate", 2.7),
    ("cheer", 2.3),
    ("excited", 1.4),
    ("exciting", 2.2),
    ("recovery", 1.4),
    ("recover", 1.4),
    ("progress", 1.8),
    ("record", 0.9),
    // Market positive
    ("gain", 2.4),
    ("gains", 1.8),
    ("profit", 1.9),
    ("profits", 1.9),
    ("profitable", 1.9),
    ("rally", 2.0),
    ("rallies", 2.0),
    ("surge", 1.8),
    ("surges", 1.8),
    ("soar", 2.2),
    ("soars", 2.2),
    ("jump", 1.0),
    ("jumps", 1.0),
    ("rise", 1.2),
    ("rises", 1.2),
    ("bullish", 2.2),
    ("breakout", 1.6),
    ("adoption", 1.3),
    ("upgrade", 1.5),
    ("outperform", 1.8),
    ("high", 0.6),
    // General negative
    ("bad", -2.5),
    ("worse", -2.1),
    ("worst", -3.1),
    ("terrible", -2.1),
    ("horrible", -2.5),
    ("awful", -2.0),
    ("negative", -2.7),
    ("sad", -2.1),
    ("hate", -2.7),
    ("fear", -2.2),
    ("fears", -1.8),
    ("afraid", -2.0),
    ("worry", -1.9),
    ("worried", -1.2),
    ("worries", -1.8),
    ("concern", -1.4),
    ("concerns", -1.5),
    ("anxiety", -0.7),
    ("panic", -2.3),
    ("crisis", -3.1),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("fails", -2.0),
    ("lose", -1.6),
    ("loses", -1.5),
    ("losing", -1.6),
    ("lost", -1.3),
    ("loss", -1.3),
    ("losses", -1.7),
    ("weak", -1.9),
    ("weaker", -1.7),
    ("risk", -1.1),
    ("risks", -1.1),
    ("risky", -1.4),
    ("threat", -2.4),
    ("threats", -1.8),
    ("danger", -2.4),
    ("dangerous", -2.1),
    ("warning", -1.4),
    ("warn", -0.4),
    ("warns", -0.4),
    ("problem", -1.7),
    ("problems", -1.7),
    ("trouble", -1.7),
    ("uncertain", -1.2),
    ("uncertainty", -1.4),
    ("volatile", -1.1),
    ("scandal", -1.9),
    ("collapse", -2.2),
    ("collapsed", -2.2),
    ("reject", -1.7),
    ("rejected", -2.2),
    ("ban", -2.6),
    ("banned", -2.0),
    ("lawsuit", -0.9),
    ("sued", -1.1),
    ("illegal", -2.6),
    ("criminal", -2.4),
    ("arrest", -1.4),
    ("arrested", -2.1),
    ("guilty", -1.8),
    ("fraud", -2.8),
    ("scam", -2.7),
    ("stolen", -2.3),
    ("steal", -2.2),
    ("theft", -1.7),
    ("hack", -1.2),
    ("hacked", -1.7),
    ("attack", -2.1),
    ("bankrupt", -2.6),
    ("bankruptcy", -2.9),
    ("crash", -1.7),
    ("crashes", -1.7),
    ("destroy", -2.5),
    ("war", -2.9),
    // Market negative
    ("drop", -1.1),
    ("drops", -1.1),
    ("fall", -1.0),
    ("falls", -1.0),
    ("fell", -1.1),
    ("plunge", -1.9),
    ("plunges", -1.9),
    ("tumble", -1.6),
    ("tumbles", -1.6),
    ("slump", -1.8),
    ("slide", -1.0),
    ("slides", -1.0),
    ("sell-off", -1.6),
    ("selloff", -1.6),
    ("bearish", -2.0),
    ("decline", -1.5),
    ("declines", -1.5),
    ("downturn", -1.6),
    ("recession", -2.1),
    ("inflation", -0.8),
    ("liquidation", -1.5),
    ("liquidated", -1.6),
    ("downgrade", -1.5),
    ("dump", -1.6),
    ("low", -1.1),
];

/// Lower-cased token → valence.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    valence: HashMap<String, f64>,
}

impl Lexicon {
    /// The compiled-in lexicon.
    pub fn builtin() -> Self {
        Self {
            valence: BUILTIN
                .iter()
                .map(|(word, v)| (word.to_string(), *v))
                .collect(),
        }
    }

    /// Parse a VADER lexicon file: one `token<TAB>mean[<TAB>...]` per line.
    pub fn from_vader_str(contents: &str) -> Result<Self, MonitorError> {
        let mut valence = HashMap::new();

        for (lineno, line) in contents.lines().enumerate() {
            let line = line.trim_end();
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split('\t');
            let token = fields.next().unwrap_or_default().trim();
            let mean = fields.next().ok_or_else(|| {
                MonitorError::Init(format!("lexicon line {}: missing valence", lineno + 1))
            })?;
            let mean: f64 = mean.trim().parse().map_err(|e| {
                MonitorError::Init(format!("lexicon line {}: bad valence {mean:?}: {e}", lineno + 1))
            })?;
            if !mean.is_finite() {
                return Err(MonitorError::Init(format!(
                    "lexicon line {}: valence {mean} is not finite",
                    lineno + 1
                )));
            }
            if token.is_empty() {
                return Err(MonitorError::Init(format!(
                    "lexicon line {}: empty token",
                    lineno + 1
                )));
            }
            valence.insert(token.to_lowercase(), mean);
        }

        if valence.is_empty() {
            return Err(MonitorError::Init("lexicon is empty".to_string()));
        }

        Ok(Self { valence })
    }

    /// Read and parse a VADER lexicon file.
    pub async fn load(path: &str) -> Result<Self, MonitorError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| MonitorError::Init(format!("cannot read lexicon {path}: {e}")))?;
        Self::from_vader_str(&contents)
    }

    /// Valence for a token, case-insensitive.
    pub fn get(&self, token: &str) -> Option<f64> {
        self.valence
            .get(token)
            .or_else(|| self.valence.get(&token.to_lowercase()))
            .copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.get(token).is_some()
    }

    pub fn len(&self) -> usize {
        self.valence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valence.is_empty()
    }
}
