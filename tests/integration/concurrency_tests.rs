/*!
 * Parsers and sanitizers share lazily built regex tables; these tests hit
 * them from many threads and tasks at once.
 */

use std::sync::Arc;
use std::thread;

use subsafe::sanitizer::{sanitize_subtitle_cues, sanitize_vtt_cue};
use subsafe::subtitle::parse_srt;

use crate::common;

#[test]
fn test_sanitize_fromManyThreads_shouldAgree() {
    let expected = sanitize_subtitle_cues(&parse_srt(common::HOSTILE_SRT).cues);
    let expected = Arc::new(expected);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let expected = Arc::clone(&expected);
            thread::spawn(move || {
                for _ in 0..20 {
                    let result = sanitize_subtitle_cues(&parse_srt(common::HOSTILE_SRT).cues);
                    assert_eq!(&result, expected.as_ref());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("sanitizer thread panicked");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sanitize_fromBlockingTasks_shouldAgree() {
    let tasks: Vec<_> = (0..16)
        .map(|i| {
            tokio::task::spawn_blocking(move || {
                let text = format!("<i>{}</i><script>x()</script><span style='top: 0'>!</span>", i);
                sanitize_vtt_cue(&text)
            })
        })
        .collect();

    for (i, task) in tasks.into_iter().enumerate() {
        assert_eq!(task.await.unwrap(), format!("<i>{}</i><span>!</span>", i));
    }
}
