//! # Similaridade Aproximada
//!
//! Pontuação de 0 a 100 baseada na distância Indel (inserções e remoções),
//! equivalente a `200 * LCS / (len(a) + len(b))`.
//!
//! [`partial_ratio`] tolera diferença de tamanho: compara a string mais curta
//! com cada janela de mesmo tamanho da mais longa, e também com as janelas
//! parciais nas bordas. 100 significa que a mais curta aparece inteira,
//! contígua, dentro da mais longa.

/// Similaridade entre duas strings inteiras (0-100).
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Melhor similaridade da string mais curta contra trechos da mais longa (0-100).
///
/// ```rust
/// use nergrep_core::fuzzy::partial_ratio;
///
/// assert_eq!(partial_ratio("microsoft", "micro"), 100.0);
/// assert!(partial_ratio("google", "micro") < 80.0);
/// ```
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() || b.is_empty() {
        return if a.is_empty() && b.is_empty() { 100.0 } else { 0.0 };
    }

    if a.len() == b.len() {
        return partial_windows(&a, &b).max(partial_windows(&b, &a));
    }
    if a.len() < b.len() {
        partial_windows(&a, &b)
    } else {
        partial_windows(&b, &a)
    }
}

/// Compara `short` com todas as janelas de `long` (len(short) <= len(long)).
fn partial_windows(short: &[char], long: &[char]) -> f64 {
    let m = short.len();
    let n = long.len();
    let mut best = 0.0f64;

    // Janelas completas
    for start in 0..=(n - m) {
        best = best.max(ratio_chars(short, &long[start..start + m]));
        if best >= 100.0 {
            return 100.0;
        }
    }

    // Janelas parciais nas bordas (prefixos e sufixos de `long` menores que `short`)
    for len in 1..m {
        best = best
            .max(ratio_chars(short, &long[..len]))
            .max(ratio_chars(short, &long[n - len..]));
    }

    best
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

/// Comprimento da maior subsequência comum (programação dinâmica, duas linhas).
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
