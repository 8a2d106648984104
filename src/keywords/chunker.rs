//! Lexicon-driven noun-phrase chunker.
//!
//! Words are classified against closed-class word lists (determiners, pronouns,
//! prepositions, conjunctions, auxiliaries, adverbs) and a list of common verbs with
//! their inflections. Anything else is treated as nominal material. A chunk is an
//! optional determiner followed by a run of nominal words; it ends at punctuation,
//! a line break, a closed-class word or a verb. Personal pronouns are chunks of their own.

use once_cell::sync::Lazy;
use std::collections::HashSet;

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "my", "your", "his", "her", "its",
    "our", "their", "some", "any", "every", "each", "no", "another", "such", "all", "both",
    "either", "neither", "several", "many", "much", "few", "whose",
];

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "myself",
    "yourself", "himself", "herself", "itself", "ourselves", "yourselves", "themselves",
];

const FUNCTION_WORDS: &[&str] = &[
    // prepositions
    "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
    "through", "during", "before", "after", "above", "below", "to", "from", "up", "down",
    "out", "off", "over", "under", "than", "as", "like", "per", "via", "within", "without",
    "upon", "across", "along", "among", "around", "behind", "beyond", "despite", "except",
    "inside", "near", "outside", "since", "toward", "towards", "until", "onto", "throughout",
    // conjunctions and wh-words
    "and", "or", "but", "nor", "so", "yet", "if", "because", "while", "although", "though",
    "whereas", "unless", "whether", "who", "whom", "what", "which", "when", "where", "why",
    "how", "whoever", "whatever",
    // auxiliaries and copulas
    "is", "am", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "doing", "will", "would", "shall", "should", "can", "could", "may",
    "might", "must", "ought", "not", "cannot",
    // adverbs and particles
    "very", "too", "also", "just", "only", "really", "there", "here", "now", "then", "never",
    "always", "often", "even", "still", "already", "quite", "rather", "perhaps", "again",
    "further", "once", "almost", "soon", "else", "ever", "however", "therefore", "thus",
    "hence", "instead", "yes", "oh",
];

const VERBS: &[&str] = &[
    "say", "make", "go", "take", "come", "see", "know", "get", "give", "find", "think", "tell",
    "become", "show", "leave", "feel", "put", "bring", "begin", "keep", "hold", "write",
    "stand", "hear", "let", "mean", "meet", "run", "pay", "sit", "speak", "lie", "lead",
    "read", "grow", "lose", "fall", "send", "build", "understand", "draw", "break", "spend",
    "cut", "rise", "drive", "buy", "wear", "choose", "seek", "throw", "catch", "deal", "win",
    "forget", "jump", "walk", "want", "use", "look", "ask", "work", "seem", "try", "call",
    "need", "provide", "include", "allow", "create", "describe", "explain", "help", "live",
    "move", "play", "remember", "start", "stop", "talk", "turn", "believe", "change",
    "follow", "happen", "appear", "consider", "continue", "develop", "expect", "offer",
    "open", "produce", "remain", "require", "suggest", "learn", "add", "agree", "apply",
    "argue", "improve", "increase", "reduce", "present", "propose", "contain", "discuss",
    "enable", "ensure", "generate", "identify", "introduce", "involve", "perform", "achieve",
    "analyze", "analyse", "compare", "determine", "establish", "examine", "extract",
    "obtain", "occur", "demonstrate", "indicate", "sleep", "eat", "drink", "sing", "swim",
    "fly", "carry", "wait", "watch", "listen", "decide", "return", "receive", "accept",
];

const IRREGULAR_VERB_FORMS: &[&str] = &[
    "said", "made", "went", "gone", "took", "taken", "came", "saw", "seen", "knew", "known",
    "got", "gotten", "gave", "given", "found", "thought", "told", "became", "showed", "shown",
    "left", "felt", "brought", "began", "begun", "kept", "held", "wrote", "written", "stood",
    "heard", "meant", "met", "ran", "paid", "sat", "spoke", "spoken", "led", "grew", "grown",
    "lost", "fell", "fallen", "sent", "built", "understood", "drew", "drawn", "broke",
    "broken", "spent", "rose", "risen", "drove", "driven", "bought", "wore", "worn", "chose",
    "chosen", "sought", "threw", "thrown", "caught", "dealt", "won", "forgot", "forgotten",
    "slept", "ate", "eaten", "drank", "sang", "swam", "flew", "flown",
];

/// Nouns that look like `-ly` adverbs
const LY_NOUNS: &[&str] = &[
    "family", "supply", "reply", "italy", "assembly", "anomaly", "butterfly",
    "rally", "belly", "jelly", "bully", "monopoly",
];

struct Lexicon {
    determiners: HashSet<&'static str>,
    pronouns: HashSet<&'static str>,
    function_words: HashSet<&'static str>,
    verbs: HashSet<&'static str>,
    irregular: HashSet<&'static str>,
    ly_nouns: HashSet<&'static str>,
}

static LEXICON: Lazy<Lexicon> = Lazy::new(|| Lexicon {
    determiners: DETERMINERS.iter().copied().collect(),
    pronouns: PRONOUNS.iter().copied().collect(),
    function_words: FUNCTION_WORDS.iter().copied().collect(),
    verbs: VERBS.iter().copied().collect(),
    irregular: IRREGULAR_VERB_FORMS.iter().copied().collect(),
    ly_nouns: LY_NOUNS.iter().copied().collect(),
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordClass {
    Determiner,
    Pronoun,
    Function,
    Verb,
    Adverb,
    Nominal,
}

impl Lexicon {
    /// Classify a lowercased word. Suffix rules only apply to words written in
    /// lowercase; a capitalized word missing from the lists is a name ("Emily", "Alfred").
    fn classify(&self, lower: &str, capitalized: bool) -> WordClass {
        if self.determiners.contains(lower) {
            WordClass::Determiner
        } else if self.pronouns.contains(lower) {
            WordClass::Pronoun
        } else if self.function_words.contains(lower) || lower.ends_with("n't") {
            WordClass::Function
        } else if self.is_listed_verb(lower) {
            WordClass::Verb
        } else if capitalized {
            WordClass::Nominal
        } else if self.is_verb_form(lower) {
            WordClass::Verb
        } else if lower.len() > 4 && lower.ends_with("ly") && !self.ly_nouns.contains(lower) {
            WordClass::Adverb
        } else {
            WordClass::Nominal
        }
    }

    fn is_listed_verb(&self, lower: &str) -> bool {
        self.verbs.contains(lower) || self.irregular.contains(lower)
    }

    /// Whether the word is closed-class: not material a noun phrase can start from
    fn is_closed_class(&self, lower: &str) -> bool {
        self.determiners.contains(lower)
            || self.function_words.contains(lower)
            || self.is_listed_verb(lower)
    }

    fn is_verb_form(&self, lower: &str) -> bool {
        if self.is_listed_verb(lower) {
            return true;
        }
        // regular past tense and participles
        if lower.len() > 4 && lower.ends_with("ed") && !lower.ends_with("eed") {
            return true;
        }

        let stems = [
            lower.strip_suffix("ies").map(|s| format!("{s}y")),
            lower.strip_suffix("ied").map(|s| format!("{s}y")),
            lower.strip_suffix("es").map(str::to_string),
            lower.strip_suffix('s').map(str::to_string),
            lower.strip_suffix("ed").map(str::to_string),
            lower
                .strip_suffix('d')
                .filter(|s| s.ends_with('e') && !s.ends_with("ee"))
                .map(str::to_string),
            lower.strip_suffix("ing").map(str::to_string),
            lower.strip_suffix("ing").map(|s| format!("{s}e")),
        ];

        stems.into_iter().flatten().any(|stem| {
            self.verbs.contains(stem.as_str()) || self.verbs.contains(undouble(&stem))
        })
    }
}

/// "runn" -> "run", "stopp" -> "stop"
fn undouble(stem: &str) -> &str {
    let bytes = stem.as_bytes();
    match bytes {
        [.., a, b] if a == b && a.is_ascii_alphabetic() => &stem[..stem.len() - 1],
        _ => stem,
    }
}

/// Force initialization of the word lists
pub fn init() {
    Lazy::force(&LEXICON);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Word { start: usize, end: usize },
    Boundary,
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Split text into words (alphanumerics with inner apostrophes or hyphens) and boundaries.
/// Punctuation and line breaks are boundaries; other whitespace only separates words.
fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();
    let mut word_start: Option<usize> = None;

    while let Some((idx, c)) = chars.next() {
        if c.is_alphanumeric() {
            word_start.get_or_insert(idx);
            continue;
        }

        let joins_word = (is_apostrophe(c) || c == '-')
            && word_start.is_some()
            && chars.peek().is_some_and(|(_, next)| next.is_alphanumeric());
        if joins_word {
            continue;
        }

        if let Some(start) = word_start.take() {
            tokens.push(Token::Word { start, end: idx });
        }
        let is_boundary = c == '\n' || c == '\r' || !c.is_whitespace();
        if is_boundary && tokens.last() != Some(&Token::Boundary) {
            tokens.push(Token::Boundary);
        }
    }

    if let Some(start) = word_start {
        tokens.push(Token::Word {
            start,
            end: text.len(),
        });
    }

    tokens
}

/// A chunk being built: its start and the end of its last nominal word
#[derive(Default)]
struct Pending {
    start: Option<usize>,
    nominal_end: Option<usize>,
}

impl Pending {
    fn flush<'a>(&mut self, text: &'a str, chunks: &mut Vec<&'a str>) {
        if let (Some(start), Some(end)) = (self.start, self.nominal_end) {
            chunks.push(&text[start..end]);
        }
        *self = Self::default();
    }

    fn open(&mut self, start: usize) {
        self.start.get_or_insert(start);
    }
}

/// Noun-phrase chunker over the built-in word lists
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconChunker;

impl LexiconChunker {
    pub fn new() -> Self {
        Self
    }

    /// Noun-phrase spans of `text`, in order of occurrence
    pub fn noun_chunks<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let lexicon = &*LEXICON;
        let mut chunks = Vec::new();
        let mut pending = Pending::default();

        for token in tokenize(text) {
            let (start, end) = match token {
                Token::Word { start, end } => (start, end),
                Token::Boundary => {
                    pending.flush(text, &mut chunks);
                    continue;
                }
            };

            let word = &text[start..end];
            let lower = word.replace('\u{2019}', "'").to_lowercase();

            // Contractions: "it's" -> "it" + "'s", "they'll" -> "they" + "'ll"
            if let Some(pos) = lower.find('\'') {
                let (base, suffix) = (&lower[..pos], &lower[pos + 1..]);
                let base_end = start
                    + word
                        .char_indices()
                        .nth(base.chars().count())
                        .map_or(word.len(), |(i, _)| i);
                if lexicon.pronouns.contains(base) {
                    pending.flush(text, &mut chunks);
                    chunks.push(&text[start..base_end]);
                    continue;
                }
                // "there's", "that's", "what's", "let's"
                if lexicon.is_closed_class(base) {
                    pending.flush(text, &mut chunks);
                    continue;
                }
                if matches!(suffix, "re" | "ve" | "ll" | "m" | "d") {
                    pending.open(start);
                    pending.nominal_end = Some(base_end);
                    pending.flush(text, &mut chunks);
                    continue;
                }
            }

            let capitalized = word.chars().next().is_some_and(char::is_uppercase);
            match lexicon.classify(&lower, capitalized) {
                WordClass::Determiner => {
                    pending.flush(text, &mut chunks);
                    pending.open(start);
                }
                WordClass::Pronoun => {
                    pending.flush(text, &mut chunks);
                    chunks.push(word);
                }
                WordClass::Function => pending.flush(text, &mut chunks),
                // A verb form right after a bare determiner is a noun ("the run") or
                // a participle modifier ("the painted wall")
                WordClass::Verb => {
                    if pending.start.is_some() && pending.nominal_end.is_none() {
                        pending.nominal_end = Some(end);
                    } else {
                        pending.flush(text, &mut chunks);
                    }
                }
                // adverbs neither open nor close a phrase
                WordClass::Adverb => {}
                WordClass::Nominal => {
                    pending.open(start);
                    pending.nominal_end = Some(end);
                }
            }
        }

        pending.flush(text, &mut chunks);
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(text: &str) -> Vec<&str> {
        LexiconChunker::new().noun_chunks(text)
    }

    #[test]
    fn test_determiner_and_modifiers() {
        assert_eq!(
            chunks("The quick brown fox. The quick brown fox jumps."),
            vec!["The quick brown fox", "The quick brown fox"]
        );
    }

    #[test]
    fn test_prepositions_split_phrases() {
        assert_eq!(
            chunks("The report on climate policy was published by the agency."),
            vec!["The report", "climate policy", "the agency"]
        );
    }

    #[test]
    fn test_pronouns_are_chunks() {
        assert_eq!(chunks("She wrote it quickly"), vec!["She", "it"]);
    }

    #[test]
    fn test_conjunction_splits_coordinated_nouns() {
        assert_eq!(chunks("cats and dogs"), vec!["cats", "dogs"]);
    }

    #[test]
    fn test_verb_after_determiner_is_nominal() {
        assert_eq!(chunks("They enjoyed the run"), vec!["They", "the run"]);
        assert_eq!(chunks("a painted wall"), vec!["a painted wall"]);
    }

    #[test]
    fn test_line_breaks_end_chunks() {
        assert_eq!(chunks("Annual Report\nRevenue growth"), vec!["Annual Report", "Revenue growth"]);
    }

    #[test]
    fn test_adverb_inside_phrase_does_not_end_it() {
        assert_eq!(chunks("a highly regarded paper"), vec!["a highly regarded paper"]);
        assert_eq!(chunks("The dog quickly ran home"), vec!["The dog", "home"]);
    }

    #[test]
    fn test_hyphens_and_possessives_stay_in_word() {
        assert_eq!(
            chunks("John's state-of-the-art laptop"),
            vec!["John's state-of-the-art laptop"]
        );
    }

    #[test]
    fn test_pronoun_contraction() {
        assert_eq!(chunks("It's a trap"), vec!["It", "a trap"]);
    }

    #[test]
    fn test_closed_class_contractions_are_not_chunks() {
        assert_eq!(
            chunks("There's a problem. That's the plan. What's the issue?"),
            vec!["a problem", "the plan", "the issue"]
        );
        assert_eq!(chunks("Here's the deal. Let's go."), vec!["the deal"]);
    }

    #[test]
    fn test_capitalized_names_are_nominal() {
        assert_eq!(
            chunks("Emily met Alfred. Emily wrote a hundred letters."),
            vec!["Emily", "Alfred", "Emily", "a hundred letters"]
        );
        assert_eq!(chunks("Mr Kelly"), vec!["Mr Kelly"]);
    }

    #[test]
    fn test_suffix_rules_still_apply_to_lowercase_words() {
        assert_eq!(chunks("the report finally arrived"), vec!["the report"]);
    }

    #[test]
    fn test_negated_auxiliary_breaks() {
        assert_eq!(chunks("The printer doesn't work"), vec!["The printer"]);
    }

    #[test]
    fn test_no_noun_phrases() {
        assert!(chunks("").is_empty());
        assert!(chunks("... !!! ,,,").is_empty());
        assert!(chunks("and of the").is_empty());
    }

    #[test]
    fn test_chunks_are_source_spans() {
        let text = "The   wide\tsky";
        let found = chunks(text);
        assert_eq!(found, vec!["The   wide\tsky"]);
        assert!(text.contains(found[0]));
    }

    #[test]
    fn test_verb_forms() {
        let lexicon = &*LEXICON;
        assert!(lexicon.is_verb_form("jumps"));
        assert!(lexicon.is_verb_form("running"));
        assert!(lexicon.is_verb_form("making"));
        assert!(lexicon.is_verb_form("tries"));
        assert!(lexicon.is_verb_form("wrote"));
        assert!(!lexicon.is_verb_form("fox"));
        assert!(!lexicon.is_verb_form("report"));
    }
}
