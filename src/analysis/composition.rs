use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::folding::window::WindowPrediction;
use crate::topology::scoring::count_to_f64;

/// Melting temperature is only estimated for sequences at least this long
pub const MIN_TM_LENGTH: usize = 14;

/// Homopolymer runs at least this long are counted as problematic
pub const HOMOPOLYMER_THRESHOLD: usize = 5;

/// Number of codons kept in [`CompositionReport::top_codons`]
pub const TOP_CODONS: usize = 12;

/// Nucleotide composition of one whole sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceStats {
    pub length: usize,
    pub gc_content: f64,
    pub at_content: f64,
    pub n_content: f64,
    /// Length excluding `N`
    pub unique_length: usize,
    /// MD5 of the uppercase sequence, lowercase hex
    pub md5: String,
}

impl SequenceStats {
    #[must_use]
    pub fn compute(sequence: &str) -> Self {
        let bases = sequence.as_bytes();
        let count = |targets: &[u8]| bases.iter().filter(|b| targets.contains(b)).count();

        let length = bases.len();
        let gc = count(b"GC");
        let at = count(b"AT");
        let n = count(b"N");

        let uppercase: Vec<u8> = bases.iter().map(u8::to_ascii_uppercase).collect();

        Self {
            length,
            gc_content: fraction(gc, length),
            at_content: fraction(at, length),
            n_content: fraction(n, length),
            unique_length: length - n,
            md5: format!("{:x}", md5::compute(&uppercase)),
        }
    }
}

/// Composition metrics for one folded window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowComposition {
    /// GC percentage (0-100); `None` for an empty sequence
    pub gc_percent: Option<f64>,
    /// `64 + 41 × (GC% / 100 − 0.5)`, only for sequences of at least 14 bases
    pub melting_temp: Option<f64>,
    /// Longest run of one repeated base
    pub max_homopolymer: Option<usize>,
    /// Shannon entropy (bits) of the structure's character distribution
    pub structure_entropy: Option<f64>,
}

impl WindowComposition {
    #[must_use]
    pub fn compute(sequence: &str, structure: &str) -> Self {
        let bases = sequence.as_bytes();
        let (gc_percent, melting_temp, max_homopolymer) = if bases.is_empty() {
            (None, None, None)
        } else {
            let gc = bases.iter().filter(|&&b| b == b'G' || b == b'C').count();
            let gc_percent = fraction(gc, bases.len()) * 100.0;
            let melting_temp =
                (bases.len() >= MIN_TM_LENGTH).then(|| 64.0 + 41.0 * (gc_percent / 100.0 - 0.5));
            (
                Some(gc_percent),
                melting_temp,
                Some(longest_run(bases)),
            )
        };

        Self {
            gc_percent,
            melting_temp,
            max_homopolymer,
            structure_entropy: shannon_entropy(structure),
        }
    }
}

/// One codon and how often it occurs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodonCount {
    pub codon: String,
    pub count: usize,
}

/// Composition statistics across all scanned windows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositionReport {
    pub gc_mean: f64,
    pub gc_std: f64,
    pub tm_mean: f64,
    pub tm_std: f64,
    pub homopolymer_mean: f64,
    /// Percentage of windows whose longest run reaches the homopolymer threshold
    pub homopolymer_problem_pct: f64,
    pub entropy_mean: f64,
    pub entropy_std: f64,
    /// Most frequent in-frame codons, by count then codon text
    pub top_codons: Vec<CodonCount>,
}

impl CompositionReport {
    #[must_use]
    pub fn from_windows(windows: &[WindowPrediction]) -> Self {
        let mut gc = Vec::new();
        let mut tm = Vec::new();
        let mut homopolymer = Vec::new();
        let mut entropy = Vec::new();
        let mut codons: HashMap<&str, usize> = HashMap::new();

        for window in windows {
            let sequence = window.prediction.sequence.as_str();
            let composition = WindowComposition::compute(sequence, window.prediction.structure.as_str());

            gc.extend(composition.gc_percent);
            tm.extend(composition.melting_temp);
            homopolymer.extend(composition.max_homopolymer);
            entropy.extend(composition.structure_entropy);

            for codon in in_frame_codons(sequence) {
                *codons.entry(codon).or_insert(0) += 1;
            }
        }

        let problematic = homopolymer
            .iter()
            .filter(|&&run| run >= HOMOPOLYMER_THRESHOLD)
            .count();
        let homopolymer_f64: Vec<f64> = homopolymer.iter().map(|&run| count_to_f64(run)).collect();

        Self {
            gc_mean: mean(&gc),
            gc_std: std_dev(&gc),
            tm_mean: mean(&tm),
            tm_std: std_dev(&tm),
            homopolymer_mean: mean(&homopolymer_f64),
            homopolymer_problem_pct: fraction(problematic, homopolymer.len()) * 100.0,
            entropy_mean: mean(&entropy),
            entropy_std: std_dev(&entropy),
            top_codons: top_codons(codons, TOP_CODONS),
        }
    }
}

/// Non-overlapping triplets starting at offset 0
fn in_frame_codons(sequence: &str) -> impl Iterator<Item = &str> {
    let full = sequence.len() / 3;
    (0..full).filter_map(move |i| sequence.get(i * 3..i * 3 + 3))
}

fn top_codons(counts: HashMap<&str, usize>, limit: usize) -> Vec<CodonCount> {
    let mut ranked: Vec<CodonCount> = counts
        .into_iter()
        .map(|(codon, count)| CodonCount {
            codon: codon.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.codon.cmp(&b.codon)));
    ranked.truncate(limit);
    ranked
}

fn longest_run(bases: &[u8]) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous = None;
    for &base in bases {
        current = if previous == Some(base) { current + 1 } else { 1 };
        longest = longest.max(current);
        previous = Some(base);
    }
    longest
}

fn shannon_entropy(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }
    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    for c in text.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }
    let total = count_to_f64(text.chars().count());
    Some(
        counts
            .values()
            .map(|&count| {
                let p = count_to_f64(count) / total;
                -p * p.log2()
            })
            .sum(),
    )
}

fn fraction(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        count_to_f64(part) / count_to_f64(whole)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / count_to_f64(values.len())
    }
}

/// Population standard deviation
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / count_to_f64(values.len());
    variance.sqrt()
}
