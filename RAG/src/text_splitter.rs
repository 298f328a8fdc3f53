use anyhow::{anyhow, bail, Result};
use regex::Regex;
use std::collections::VecDeque;

/// Paragraph, line, word, then single characters.
pub const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

struct Separator {
    literal: String,
    // `None` is the empty separator, which splits into single characters.
    pattern: Option<Regex>,
}

impl Separator {
    fn compile(separator: &str, is_regex: bool) -> Result<Self> {
        let pattern = if separator.is_empty() {
            None
        } else {
            let source = if is_regex {
                separator.to_string()
            } else {
                regex::escape(separator)
            };
            let re = Regex::new(&source)
                .map_err(|e| anyhow!("invalid separator {:?}: {}", separator, e))?;
            Some(re)
        };

        Ok(Self {
            literal: separator.to_string(),
            pattern,
        })
    }
}

/// Greedy recursive splitter: tries each separator in order and only falls
/// back to the next one for pieces that are still too long.
///
/// Lengths are counted in characters, not bytes.
pub struct RecursiveCharacterTextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<Separator>,
    keep_separator: bool,
}

impl RecursiveCharacterTextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        Self::with_separators(chunk_size, chunk_overlap, &DEFAULT_SEPARATORS, false)
    }

    pub fn with_separators(
        chunk_size: usize,
        chunk_overlap: usize,
        separators: &[&str],
        is_separator_regex: bool,
    ) -> Result<Self> {
        if chunk_size == 0 {
            bail!("chunk size must be greater than zero");
        }
        if chunk_overlap > chunk_size {
            bail!(
                "chunk overlap ({}) is larger than chunk size ({})",
                chunk_overlap,
                chunk_size
            );
        }
        if separators.is_empty() {
            bail!("at least one separator is required");
        }

        let separators = separators
            .iter()
            .map(|s| Separator::compile(s, is_separator_regex))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            chunk_size,
            chunk_overlap,
            separators,
            keep_separator: true,
        })
    }

    /// When false, separators are dropped from the pieces and re-inserted
    /// between them on merge.
    pub fn keep_separator(mut self, keep: bool) -> Self {
        self.keep_separator = keep;
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_recursive(text, &self.separators)
    }

    fn split_recursive(&self, text: &str, separators: &[Separator]) -> Vec<String> {
        let mut final_chunks = Vec::new();

        let mut chosen = separators.len() - 1;
        let mut remaining: &[Separator] = &[];
        for (i, separator) in separators.iter().enumerate() {
            match &separator.pattern {
                None => {
                    chosen = i;
                    break;
                }
                Some(re) if re.is_match(text) => {
                    chosen = i;
                    remaining = &separators[i + 1..];
                    break;
                }
                Some(_) => {}
            }
        }

        let separator = &separators[chosen];
        let pieces = self.split_on(text, separator);
        let joiner = if self.keep_separator {
            ""
        } else {
            separator.literal.as_str()
        };

        let mut good_pieces: Vec<&str> = Vec::new();
        for piece in pieces {
            if char_len(piece) < self.chunk_size {
                good_pieces.push(piece);
                continue;
            }

            if !good_pieces.is_empty() {
                final_chunks.extend(self.merge_pieces(&good_pieces, joiner));
                good_pieces.clear();
            }

            if remaining.is_empty() {
                final_chunks.push(piece.to_string());
            } else {
                final_chunks.extend(self.split_recursive(piece, remaining));
            }
        }

        if !good_pieces.is_empty() {
            final_chunks.extend(self.merge_pieces(&good_pieces, joiner));
        }

        final_chunks
    }

    fn split_on<'a>(&self, text: &'a str, separator: &Separator) -> Vec<&'a str> {
        let re = match &separator.pattern {
            Some(re) => re,
            None => {
                return text
                    .char_indices()
                    .map(|(i, c)| &text[i..i + c.len_utf8()])
                    .collect();
            }
        };

        let mut pieces = Vec::new();
        let mut last = 0;
        for m in re.find_iter(text) {
            if m.start() == m.end() {
                continue;
            }
            pieces.push(&text[last..m.start()]);
            // Kept separators lead the following piece.
            last = if self.keep_separator { m.start() } else { m.end() };
        }
        pieces.push(&text[last..]);

        pieces.retain(|p| !p.is_empty());
        pieces
    }

    fn merge_pieces(&self, pieces: &[&str], joiner: &str) -> Vec<String> {
        let joiner_len = char_len(joiner);
        let mut chunks = Vec::new();
        let mut current: VecDeque<&str> = VecDeque::new();
        let mut total = 0;

        for &piece in pieces {
            let len = char_len(piece);
            let pending_joiner = if current.is_empty() { 0 } else { joiner_len };

            if total + len + pending_joiner > self.chunk_size {
                if total > self.chunk_size {
                    log::warn!(
                        "Created a chunk of size {}, which is longer than the specified {}",
                        total,
                        self.chunk_size
                    );
                }

                if !current.is_empty() {
                    if let Some(chunk) = join_pieces(&current, joiner) {
                        chunks.push(chunk);
                    }

                    // Drop leading pieces until the carried tail fits the overlap
                    // and the incoming piece fits the chunk.
                    loop {
                        let pending_joiner = if current.is_empty() { 0 } else { joiner_len };
                        let too_long = total + len + pending_joiner > self.chunk_size;
                        if !(total > self.chunk_overlap || (too_long && total > 0)) {
                            break;
                        }

                        let had_joiner = current.len() > 1;
                        match current.pop_front() {
                            Some(first) => {
                                total -= char_len(first) + if had_joiner { joiner_len } else { 0 };
                            }
                            None => break,
                        }
                    }
                }
            }

            current.push_back(piece);
            total += len + if current.len() > 1 { joiner_len } else { 0 };
        }

        if let Some(chunk) = join_pieces(&current, joiner) {
            chunks.push(chunk);
        }

        chunks
    }
}

fn join_pieces(pieces: &VecDeque<&str>, joiner: &str) -> Option<String> {
    let joined = pieces.iter().copied().collect::<Vec<&str>>().join(joiner);
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
