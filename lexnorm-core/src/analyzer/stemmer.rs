//! Porter stemmer.
//!
//! Implements the suffix-stripping algorithm from M.F. Porter, "An algorithm
//! for suffix stripping", Program 14(3), 1980, pinned to the published
//! reference implementation (the ANSI C version distributed by the author).
//! That version carries two departures from the paper which are reproduced
//! here: step 2 rewrites `bli` → `ble` (instead of `abli` → `able`) and adds
//! `logi` → `log`.
//!
//! Rule order and tie-breaks follow the reference exactly: within a step the
//! first matching suffix wins, even if its measure condition then fails.
//! Any change here changes classifier features.
//!
//! ## Stable stems
//!
//! A single pass of the algorithm is not idempotent: `agreed` → `agre` →
//! `agr`. [`PorterStemmer::stem`] therefore repeats the pass until the word
//! stops changing. Each pass that changes a word either shortens it or keeps
//! its length while turning a `y` into an `i`, so the loop terminates.
//! [`PorterStemmer::stem_once`] exposes the single published pass.
//!
//! Words of length ≤ 2 are returned unchanged, as in the reference, and so
//! are words longer than [`MAX_STEM_LEN`]. Words containing non-ASCII bytes
//! are returned unchanged; other non-letter ASCII bytes count as consonants.

use smallvec::SmallVec;

type Buf = SmallVec<[u8; 32]>;

const STEP2: &[(&[u8], &[u8])] = &[
    (b"ational", b"ate"),
    (b"tional", b"tion"),
    (b"enci", b"ence"),
    (b"anci", b"ance"),
    (b"izer", b"ize"),
    (b"bli", b"ble"),
    (b"alli", b"al"),
    (b"entli", b"ent"),
    (b"eli", b"e"),
    (b"ousli", b"ous"),
    (b"ization", b"ize"),
    (b"ation", b"ate"),
    (b"ator", b"ate"),
    (b"alism", b"al"),
    (b"iveness", b"ive"),
    (b"fulness", b"ful"),
    (b"ousness", b"ous"),
    (b"aliti", b"al"),
    (b"iviti", b"ive"),
    (b"biliti", b"ble"),
    (b"logi", b"log"),
];

const STEP3: &[(&[u8], &[u8])] = &[
    (b"icate", b"ic"),
    (b"ative", b""),
    (b"alize", b"al"),
    (b"iciti", b"ic"),
    (b"ical", b"ic"),
    (b"ful", b""),
    (b"ness", b""),
];

const STEP4: &[&[u8]] = &[
    b"al", b"ance", b"ence", b"er", b"ic", b"able", b"ible", b"ant", b"ement", b"ment", b"ent",
    b"ion", b"ou", b"ism", b"ate", b"iti", b"ous", b"ive", b"ize",
];

/// Porter (1980) stemmer. Stateless; one instance can be shared freely.
///
/// # Examples
///
/// ```
/// use lexnorm_core::analyzer::stemmer::PorterStemmer;
///
/// let stemmer = PorterStemmer::new();
/// assert_eq!(stemmer.stem("clicked"), "click");
/// assert_eq!(stemmer.stem("winning"), "win");
/// assert_eq!(stemmer.stem("money"), "monei");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Creates a stemmer.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the stable stem: [`stem_once`](Self::stem_once) repeated to a
    /// fixed point, so `stem(stem(w)) == stem(w)`.
    pub fn stem(&self, word: &str) -> String {
        if !is_stemmable(word) {
            return word.to_string();
        }

        let mut cur = Word::new(word.as_bytes());
        loop {
            let before = cur.b.clone();
            cur.run();
            if cur.b == before {
                return cur.into_string();
            }
        }
    }

    /// One pass of the published algorithm.
    pub fn stem_once(&self, word: &str) -> String {
        if !is_stemmable(word) {
            return word.to_string();
        }
        let mut w = Word::new(word.as_bytes());
        w.run();
        w.into_string()
    }
}

/// Longest token the stemmer touches, in bytes.
///
/// Longer tokens are returned unchanged. Real words are far shorter; the
/// bound keeps [`PorterStemmer::stem`] constant-time per token, since every
/// fixed-point pass is linear in the word and may strip only a few bytes.
pub const MAX_STEM_LEN: usize = 64;

#[inline]
fn is_stemmable(word: &str) -> bool {
    (3..=MAX_STEM_LEN).contains(&word.len()) && word.is_ascii()
}

/// Working buffer. `b.len()` plays the role of the reference's `k + 1`, and
/// `j` is the length of the stem left after the last successful `ends`.
struct Word {
    b: Buf,
    j: usize,
}

impl Word {
    fn new(bytes: &[u8]) -> Self {
        Self {
            b: SmallVec::from_slice(bytes),
            j: 0,
        }
    }

    fn into_string(self) -> String {
        self.b.iter().map(|&c| c as char).collect()
    }

    fn run(&mut self) {
        if self.b.len() <= 2 {
            return;
        }
        self.step1ab();
        if self.b.len() > 1 {
            self.step1c();
            self.step2();
            self.step3();
            self.step4();
            self.step5();
        }
    }

    /// True if `b[i]` is a consonant. `y` is a consonant at the start of a
    /// word or after a vowel.
    fn cons(&self, i: usize) -> bool {
        match self.b[i] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !self.cons(i - 1),
            _ => true,
        }
    }

    /// Number of VC sequences in `b[..j]`: `[C](VC)^m[V]`.
    fn m(&self) -> usize {
        let j = self.j;
        let mut n = 0;
        let mut i = 0;

        while i < j && self.cons(i) {
            i += 1;
        }
        loop {
            while i < j && !self.cons(i) {
                i += 1;
            }
            if i >= j {
                return n;
            }
            while i < j && self.cons(i) {
                i += 1;
            }
            n += 1;
            if i >= j {
                return n;
            }
        }
    }

    fn vowel_in_stem(&self) -> bool {
        (0..self.j).any(|i| !self.cons(i))
    }

    /// `b[i-1..=i]` is a double consonant.
    fn doublec(&self, i: usize) -> bool {
        i >= 1 && self.b[i] == self.b[i - 1] && self.cons(i)
    }

    /// `b[i-2..=i]` is consonant-vowel-consonant and the last consonant is
    /// not `w`, `x` or `y`.
    fn cvc(&self, i: usize) -> bool {
        if i < 2 || !self.cons(i) || self.cons(i - 1) || !self.cons(i - 2) {
            return false;
        }
        !matches!(self.b[i], b'w' | b'x' | b'y')
    }

    fn ends(&mut self, s: &[u8]) -> bool {
        if self.b.ends_with(s) {
            self.j = self.b.len() - s.len();
            true
        } else {
            false
        }
    }

    fn set_to(&mut self, s: &[u8]) {
        self.b.truncate(self.j);
        self.b.extend_from_slice(s);
    }

    fn replace_if_measured(&mut self, s: &[u8]) {
        if self.m() > 0 {
            self.set_to(s);
        }
    }

    fn last(&self) -> u8 {
        self.b[self.b.len() - 1]
    }

    /// Plurals and `-ed`/`-ing`.
    fn step1ab(&mut self) {
        if self.last() == b's' {
            if self.ends(b"sses") {
                self.b.truncate(self.b.len() - 2);
            } else if self.ends(b"ies") {
                self.set_to(b"i");
            } else if self.b[self.b.len() - 2] != b's' {
                self.b.pop();
            }
        }

        if self.ends(b"eed") {
            if self.m() > 0 {
                self.b.pop();
            }
        } else if (self.ends(b"ed") || self.ends(b"ing")) && self.vowel_in_stem() {
            self.b.truncate(self.j);
            if self.ends(b"at") {
                self.set_to(b"ate");
            } else if self.ends(b"bl") {
                self.set_to(b"ble");
            } else if self.ends(b"iz") {
                self.set_to(b"ize");
            } else if !self.b.is_empty() && self.doublec(self.b.len() - 1) {
                if !matches!(self.last(), b'l' | b's' | b'z') {
                    self.b.pop();
                }
            } else {
                self.j = self.b.len();
                if self.m() == 1 && !self.b.is_empty() && self.cvc(self.b.len() - 1) {
                    self.b.push(b'e');
                }
            }
        }
    }

    /// Terminal `y` → `i` when there is another vowel in the stem.
    fn step1c(&mut self) {
        if self.ends(b"y") && self.vowel_in_stem() {
            let last = self.b.len() - 1;
            self.b[last] = b'i';
        }
    }

    /// Double suffixes mapped to single ones.
    fn step2(&mut self) {
        for &(suffix, repl) in STEP2 {
            if self.ends(suffix) {
                self.replace_if_measured(repl);
                return;
            }
        }
    }

    /// `-ic-`, `-full`, `-ness` and friends.
    fn step3(&mut self) {
        for &(suffix, repl) in STEP3 {
            if self.ends(suffix) {
                self.replace_if_measured(repl);
                return;
            }
        }
    }

    /// Strips a final suffix when the remaining stem has `m > 1`.
    fn step4(&mut self) {
        for &suffix in STEP4 {
            if !self.ends(suffix) {
                continue;
            }
            if suffix == b"ion" && !(self.j >= 1 && matches!(self.b[self.j - 1], b's' | b't')) {
                continue;
            }
            if self.m() > 1 {
                self.b.truncate(self.j);
            }
            return;
        }
    }

    /// Final `-e` and `-ll`.
    fn step5(&mut self) {
        self.j = self.b.len();
        // measured once: dropping a final vowel never changes m
        let a = self.m();
        if self.last() == b'e' {
            let len = self.b.len();
            if a > 1 || (a == 1 && !(len >= 2 && self.cvc(len - 2))) {
                self.b.pop();
            }
        }
        let len = self.b.len();
        if len >= 1 && self.last() == b'l' && self.doublec(len - 1) && a > 1 {
            self.b.pop();
        }
    }
}
