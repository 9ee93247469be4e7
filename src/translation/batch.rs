/*!
 * Splitting cues into translation batches with surrounding context.
 */

use crate::subtitle::Cue;

/// A contiguous run of cues plus read-only context on both sides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationBatch {
    /// Cues to translate
    pub cues: Vec<Cue>,
    /// Up to `context_size` cues immediately before the batch
    pub prev_context: Vec<Cue>,
    /// Up to `context_size` cues immediately after the batch
    pub next_context: Vec<Cue>,
    /// Position of the first cue in the full list
    pub start_index: usize,
    /// Position of the last cue in the full list
    pub end_index: usize,
}

/// Split `cues` into batches of `batch_size` (at least one cue each).
pub fn create_batches(
    cues: &[Cue],
    batch_size: usize,
    context_size: usize,
) -> Vec<TranslationBatch> {
    let batch_size = batch_size.max(1);

    cues.chunks(batch_size)
        .enumerate()
        .map(|(chunk_number, chunk)| {
            let start = chunk_number * batch_size;
            let end = start + chunk.len();

            TranslationBatch {
                cues: chunk.to_vec(),
                prev_context: cues[start.saturating_sub(context_size)..start].to_vec(),
                next_context: cues[end..(end + context_size).min(cues.len())].to_vec(),
                start_index: start,
                end_index: end - 1,
            }
        })
        .collect()
}
