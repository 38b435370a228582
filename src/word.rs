use crate::config::ConfigError;

// Built-in Turkish word pool, used when no words file is given
pub const DEFAULT_WORDS: &[&str] = &[
    "güvenlik", "sistem", "kapı", "giriş", "çıkış",
    "merhaba", "hoşgeldin", "teşekkür", "lütfen", "tamam",
    "başla", "bitir", "devam", "dur", "bekle",
    "açık", "kapalı", "yeşil", "kırmızı", "mavi",
    "bir", "iki", "üç", "dört", "beş",
    "altı", "yedi", "sekiz", "dokuz", "on",
    "güzel", "harika", "mükemmel", "başarılı", "doğru",
    "ev", "ofis", "masa", "sandalye", "pencere",
    "telefon", "bilgisayar", "tablet", "kamera", "mikrofon",
    "kitap", "kalem", "kağıt", "dosya", "klasör",
    "su", "çay", "kahve", "ekmek", "peynir",
    "sabah", "öğle", "akşam", "gece", "gün",
    "pazartesi", "salı", "çarşamba", "perşembe", "cuma",
    "ocak", "şubat", "mart", "nisan", "mayıs",
    "haziran", "temmuz", "ağustos", "eylül", "ekim",
];

// Deterministic time-window word selection. Immutable after startup,
// so handlers can share it without any locking.
pub struct WordSelector {
    words: Vec<String>,
    window_secs: u64,
}

// Everything a response needs to know about the current window
pub struct Selection {
    pub word: String,
    pub interval_index: u64,
    pub word_index: usize,
    pub next_change_at: u64,
    pub remaining_secs: u64,
}

impl WordSelector {
    pub fn new(words: Vec<String>, window_secs: u64) -> Result<Self, ConfigError> {
        if words.is_empty() {
            return Err(ConfigError::EmptyWordPool);
        }
        if window_secs == 0 {
            return Err(ConfigError::NonPositive { name: "window-secs" });
        }
        Ok(Self { words, window_secs })
    }

    // Pure function of t: every caller inside the same window sees the
    // same word, across restarts too
    pub fn select(&self, t: u64) -> Selection {
        let interval_index = t / self.window_secs;
        let word_index = (interval_index % self.words.len() as u64) as usize;
        let next_change_at = (interval_index + 1) * self.window_secs;

        Selection {
            word: self.words[word_index].clone(),
            interval_index,
            word_index,
            next_change_at,
            remaining_secs: next_change_at - t,
        }
    }

    pub fn pool_size(&self) -> usize {
        self.words.len()
    }

    pub fn window_secs(&self) -> u64 {
        self.window_secs
    }
}
