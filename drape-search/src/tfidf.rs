//! TF-IDF text vectorization and cosine similarity.
//!
//! Tokens are lowercase runs of two or more word characters with English
//! stop words removed. IDF is smoothed (`ln((1 + n) / (1 + df)) + 1`) and
//! every vector is L2 normalized, so cosine similarity reduces to a dot
//! product.

use std::collections::{BTreeMap, HashMap, HashSet};

/// Sparse vector as `(term index, weight)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

/// Fitted TF-IDF model.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    stop_words: HashSet<&'static str>,
}

impl TfidfVectorizer {
    /// Fits the vocabulary and IDF weights, returning the model and one
    /// normalized vector per document.
    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> (Self, Vec<SparseVector>) {
        let stop_words: HashSet<&'static str> = ENGLISH_STOP_WORDS.iter().copied().collect();

        let term_counts: Vec<BTreeMap<String, usize>> = documents
            .iter()
            .map(|doc| count_terms(doc.as_ref(), &stop_words))
            .collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for counts in &term_counts {
            for term in counts.keys() {
                *document_frequency.entry(term.as_str()).or_default() += 1;
            }
        }

        // Sorted vocabulary keeps term indices stable across runs.
        let n = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (term, df)) in document_frequency.iter().enumerate() {
            vocabulary.insert((*term).to_string(), index);
            idf.push(((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0);
        }

        let model = Self {
            vocabulary,
            idf,
            stop_words,
        };
        let matrix = term_counts
            .iter()
            .map(|counts| model.weigh(counts))
            .collect();

        (model, matrix)
    }

    /// Vectorizes text with the fitted vocabulary; unknown terms are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&count_terms(text, &self.stop_words))
    }

    /// Number of distinct terms learned during fitting.
    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }

    fn weigh(&self, counts: &BTreeMap<String, usize>) -> SparseVector {
        let mut vector: SparseVector = counts
            .iter()
            .filter_map(|(term, count)| {
                self.vocabulary
                    .get(term)
                    .map(|&index| (index, *count as f64 * self.idf[index]))
            })
            .collect();
        vector.sort_by_key(|(index, _)| *index);

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut vector {
                *weight /= norm;
            }
        }
        vector
    }
}

/// Cosine similarity of two normalized sparse vectors.
pub fn cosine_similarity(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut dot = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    dot
}

fn count_terms(text: &str, stop_words: &HashSet<&'static str>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for token in tokenize(text) {
        if !stop_words.contains(token.as_str()) {
            *counts.entry(token).or_default() += 1;
        }
    }
    counts
}

/// Splits text into lowercase tokens of at least two word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_lowercase)
        .collect()
}

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Black & Green A-line kurta, 3/4 sleeves"),
            vec!["black", "green", "line", "kurta", "sleeves"]
        );
    }

    #[test]
    fn test_stop_words_removed() {
        let (model, _) = TfidfVectorizer::fit_transform(&["the black dress with a belt"]);
        assert_eq!(model.vocabulary_len(), 3);
    }

    #[test]
    fn test_vectors_are_normalized() {
        let (_, matrix) =
            TfidfVectorizer::fit_transform(&["black ethnic kurta", "orange solid kurta"]);
        for row in &matrix {
            let norm: f64 = row.iter().map(|(_, w)| w * w).sum();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_similarity_ranks_overlap() {
        let docs = [
            "black printed kurta ethnic motifs anarkali",
            "orange solid kurta palazzos",
            "navy blue embroidered kurta trousers",
        ];
        let (model, matrix) = TfidfVectorizer::fit_transform(&docs);
        let query = model.transform("black ethnic anarkali");

        let scores: Vec<f64> = matrix.iter().map(|row| cosine_similarity(&query, row)).collect();
        assert!(scores[0] > 0.5);
        assert_eq!(scores[1], 0.0);
        assert_eq!(scores[2], 0.0);

        let identical = model.transform(docs[0]);
        assert!((cosine_similarity(&identical, &matrix[0]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_query_is_empty() {
        let (model, _) = TfidfVectorizer::fit_transform(&["blue jeans"]);
        assert!(model.transform("velvet").is_empty());
        assert!(model.transform("").is_empty());
    }
}
