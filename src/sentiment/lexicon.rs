use std::collections::HashMap;
use std::sync::OnceLock;

use crate::core::NsError;

/// Token valences on the `[-4, 4]` scale used by VADER-style scorers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexicon {
    valences: HashMap<String, f64>,
}

impl Lexicon {
    /// The bundled lexicon: general polarity words plus market vocabulary.
    #[must_use]
    pub fn builtin() -> Self {
        let valences = BUILTIN
            .iter()
            .map(|(word, v)| ((*word).to_string(), *v))
            .collect();
        Self { valences }
    }

    /// Parses a lexicon in the VADER text layout: one entry per line,
    /// `token<TAB>mean valence[<TAB>...]`. Blank lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns `NsError::Data` naming the first line without a numeric valence.
    pub fn from_vader_text(text: &str) -> Result<Self, NsError> {
        let mut valences = HashMap::new();
        for (n, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let mut cols = line.split('\t');
            let token = cols.next().unwrap_or_default().trim();
            let valence = cols
                .next()
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .ok_or_else(|| NsError::Data(format!("lexicon line {}: no valence", n + 1)))?;
            if !token.is_empty() {
                valences.insert(token.to_lowercase(), valence);
            }
        }
        Ok(Self { valences })
    }

    /// Valence of a lowercased token.
    #[must_use]
    pub fn get(&self, token: &str) -> Option<f64> {
        self.valences.get(token).copied()
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.valences.contains_key(token)
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, token: impl AsRef<str>, valence: f64) {
        self.valences.insert(token.as_ref().to_lowercase(), valence);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.valences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}

static LEXICON: OnceLock<Lexicon> = OnceLock::new();

/// Loads the process-wide lexicon on first call and returns it.
///
/// Safe to call any number of times from any thread; only the first call does work.
pub fn init() -> &'static Lexicon {
    LEXICON.get_or_init(Lexicon::builtin)
}

/// Installs `lexicon` as the process-wide lexicon.
///
/// # Errors
///
/// Gives `lexicon` back if a lexicon was already installed, either by an
/// earlier `init_with` or by [`init`].
pub fn init_with(lexicon: Lexicon) -> Result<&'static Lexicon, Lexicon> {
    LEXICON.set(lexicon)?;
    Ok(init())
}

/// Whether the process-wide lexicon has been loaded.
pub fn is_initialized() -> bool {
    LEXICON.get().is_some()
}

#[rustfmt::skip]
const BUILTIN: &[(&str, f64)] = &[
    // general polarity
    ("good", 1.9), ("great", 3.1), ("excellent", 2.7), ("best", 3.2), ("better", 1.9),
    ("positive", 2.6), ("strong", 2.3), ("stronger", 2.1), ("strongest", 2.6),
    ("win", 2.8), ("wins", 2.7), ("won", 2.7), ("winner", 2.8), ("winning", 2.4),
    ("success", 2.7), ("successful", 2.8), ("succeed", 2.2), ("succeeds", 2.2),
    ("happy", 2.7), ("love", 3.2), ("like", 1.5), ("optimistic", 1.3), ("optimism", 2.5),
    ("confident", 2.2), ("confidence", 2.3), ("hope", 1.9), ("hopes", 1.8),
    ("improve", 1.9), ("improves", 1.8), ("improved", 2.1), ("improvement", 2.0),
    ("benefit", 2.0), ("benefits", 1.6), ("opportunity", 1.8), ("opportunities", 1.6),
    ("innovative", 2.0), ("innovation", 1.6), ("boost", 1.7), ("boosts", 1.3),
    ("boosted", 1.5), ("support", 1.7), ("supports", 1.5), ("upbeat", 1.9),
    ("bad", -2.5), ("worse", -2.1), ("worst", -3.1), ("poor", -2.1), ("negative", -2.7),
    ("weak", -1.9), ("weaker", -1.9), ("weakness", -1.9), ("lose", -1.7), ("loses", -1.3),
    ("lost", -1.3), ("losing", -1.6), ("fail", -2.5), ("fails", -1.8), ("failed", -2.3),
    ("failure", -2.3), ("sad", -2.1), ("hate", -2.7), ("fear", -2.2), ("fears", -1.8),
    ("worry", -1.9), ("worries", -1.6), ("worried", -1.2), ("concern", -1.3),
    ("concerns", -1.1), ("risk", -1.1), ("risks", -1.1), ("risky", -1.4),
    ("problem", -1.7), ("problems", -1.7), ("trouble", -1.7), ("troubled", -2.0),
    ("crisis", -3.1), ("danger", -2.4), ("threat", -2.4), ("threatens", -1.6),
    ("hurt", -2.4), ("hurts", -2.1), ("pain", -2.3), ("damage", -2.2), ("damaged", -1.9),
    ("uncertain", -1.2), ("uncertainty", -1.4), ("disappoint", -1.7),
    ("disappoints", -1.6), ("disappointed", -1.9), ("disappointing", -2.2),
    ("disappointment", -2.3), ("doubt", -1.5), ("doubts", -1.2), ("struggle", -1.5),
    ("struggles", -1.5), ("struggling", -1.8), ("angry", -2.3), ("scandal", -1.9),
    ("wrong", -2.1), ("error", -1.7), ("errors", -1.4), ("panic", -2.3),
    // market vocabulary
    ("beat", 1.6), ("beats", 1.6), ("tops", 1.4), ("exceeds", 1.8), ("exceeded", 1.6),
    ("surge", 2.0), ("surges", 2.0), ("surged", 2.0), ("surging", 2.0),
    ("soar", 2.2), ("soars", 2.2), ("soared", 2.2), ("soaring", 2.2),
    ("jump", 1.5), ("jumps", 1.5), ("jumped", 1.5), ("climb", 1.3), ("climbs", 1.3),
    ("climbed", 1.3), ("rally", 1.9), ("rallies", 1.9), ("rallied", 1.9),
    ("gain", 2.0), ("gains", 1.8), ("gained", 1.6), ("rise", 1.1), ("rises", 1.1),
    ("rising", 1.0), ("rebound", 1.4), ("rebounds", 1.4), ("recover", 1.5),
    ("recovers", 1.5), ("recovery", 1.5), ("upgrade", 1.8), ("upgrades", 1.8),
    ("upgraded", 1.8), ("outperform", 1.9), ("outperforms", 1.9), ("bullish", 2.2),
    ("buy", 0.9), ("record", 1.2), ("growth", 1.9), ("grow", 1.6), ("grows", 1.6),
    ("profit", 1.9), ("profits", 1.8), ("profitable", 2.1), ("dividend", 1.1),
    ("breakthrough", 2.4), ("approval", 2.0), ("approved", 1.8), ("approves", 1.7),
    ("expands", 1.2), ("expansion", 1.2), ("raises", 1.0), ("upside", 1.5),
    ("miss", -1.6), ("misses", -1.6), ("missed", -1.6), ("plunge", -2.4),
    ("plunges", -2.4), ("plunged", -2.4), ("plummet", -2.6), ("plummets", -2.6),
    ("slump", -2.0), ("slumps", -2.0), ("slumped", -2.0), ("tumble", -2.0),
    ("tumbles", -2.0), ("tumbled", -2.0), ("sink", -1.7), ("sinks", -1.7), ("sank", -1.7),
    ("fall", -1.4), ("falls", -1.4), ("fell", -1.4), ("falling", -1.4),
    ("drop", -1.3), ("drops", -1.3), ("dropped", -1.3), ("slide", -1.3), ("slides", -1.3),
    ("decline", -1.5), ("declines", -1.5), ("declined", -1.5), ("declining", -1.5),
    ("crash", -2.9), ("crashes", -2.8), ("selloff", -2.0), ("sell-off", -2.0),
    ("downgrade", -1.8), ("downgrades", -1.8), ("downgraded", -1.8),
    ("underperform", -1.9), ("bearish", -2.2), ("sell", -0.9), ("loss", -1.3),
    ("losses", -1.6), ("deficit", -1.5), ("debt", -1.2), ("default", -2.0),
    ("bankruptcy", -3.0), ("bankrupt", -2.8), ("layoffs", -2.1), ("layoff", -2.0),
    ("cut", -1.1), ("cuts", -1.1), ("lawsuit", -1.8), ("sued", -2.1), ("sues", -1.9),
    ("fraud", -3.2), ("probe", -1.4), ("investigation", -1.2), ("recall", -1.6),
    ("recalls", -1.6), ("fine", 0.8), ("fined", -1.7), ("penalty", -1.6),
    ("warning", -1.5), ("warns", -1.6), ("warned", -1.5), ("volatile", -1.3),
    ("volatility", -1.1), ("recession", -2.4), ("inflation", -1.1), ("downside", -1.5),
    ("halt", -1.4), ("halts", -1.4), ("delay", -1.3), ("delays", -1.3), ("delayed", -1.3),
];
