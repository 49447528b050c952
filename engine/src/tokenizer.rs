use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;
use std::collections::HashSet;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)[\p{L}\p{N}][\p{L}\p{N}_']*(?:-[\p{L}\p{N}][\p{L}\p{N}_']*)*").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Turns raw text into canonical search tokens.
///
/// The default normalizer keeps every word; stopword removal is opt-in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    remove_stopwords: bool,
}

impl Normalizer {
    pub fn new(remove_stopwords: bool) -> Self {
        Self { remove_stopwords }
    }

    /// NFKC-normalize, lowercase, split into words and stem each one.
    ///
    /// Order and duplicates are preserved; punctuation never becomes a token.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let normalized = text.nfkc().collect::<String>().to_lowercase();
        let mut tokens = Vec::new();
        for mat in RE.find_iter(&normalized) {
            let token = mat.as_str();
            if self.remove_stopwords && is_stopword(token) { continue; }
            tokens.push(STEMMER.stem(token).into_owned());
        }
        tokens
    }
}

/// Normalize with the default settings.
pub fn normalize(text: &str) -> Vec<String> {
    Normalizer::default().normalize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_normalize() {
        let t = normalize("Running, runner's run!");
        assert!(t.iter().any(|w| w == "run"));
        assert!(!t.iter().any(|w| w == ","));
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let t = normalize("risk and risks");
        assert_eq!(t, vec!["risk", "and", "risk"]);
    }

    #[test]
    fn stopwords_only_when_enabled() {
        assert!(normalize("the risk").contains(&"the".to_string()));
        let filtered = Normalizer::new(true).normalize("the risk");
        assert_eq!(filtered, vec!["risk"]);
    }

    #[test]
    fn hyphenated_words_stay_whole() {
        let t = normalize("fail-safes");
        assert_eq!(t.len(), 1);
        assert!(t[0].starts_with("fail-saf"));
    }
}
