use crate::application::ports::assistant_gateway::{
    Annotation, AnnotationKind, TextSegment, ThreadMessage,
};
use crate::domain::value_objects::MessageRole;

/// A citation whose marker is already spliced into the reply text but whose
/// filename still has to be resolved against the external file metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCitation {
    pub marker: String,
    pub file_id: String,
    pub quote: Option<String>,
    pub path_citation: bool,
}

impl PendingCitation {
    fn from_annotation(annotation: &Annotation, marker: String) -> Self {
        match &annotation.kind {
            AnnotationKind::FileCitation { file_id, quote } => Self {
                marker,
                file_id: file_id.clone(),
                quote: quote.clone().or_else(|| Some(annotation.text.clone())),
                path_citation: false,
            },
            AnnotationKind::FilePath { file_id } => Self {
                marker,
                file_id: file_id.clone(),
                quote: None,
                path_citation: true,
            },
        }
    }
}

/// Concatenates the assistant-authored messages into one reply, replacing
/// every citation annotation with a ` [n]` marker. Markers are numbered
/// across the whole reply in order of first appearance.
pub fn assemble_reply(messages: &[ThreadMessage]) -> (String, Vec<PendingCitation>) {
    let mut parts = Vec::new();
    let mut pending = Vec::new();

    for message in messages {
        if message.role != MessageRole::Assistant {
            continue;
        }

        let mut message_text = String::new();
        for segment in &message.segments {
            message_text.push_str(&rewrite_segment(segment, &mut pending));
        }

        if !message_text.is_empty() {
            parts.push(message_text);
        }
    }

    (parts.join("\n"), pending)
}

/// Splices markers into one text segment. Annotations with usable offset
/// ranges are replaced by exact span; the rest fall back to replacing the
/// first occurrence of the annotation text, which collides on duplicate
/// substrings.
fn rewrite_segment(segment: &TextSegment, pending: &mut Vec<PendingCitation>) -> String {
    if segment.annotations.is_empty() {
        return segment.text.clone();
    }

    let text = segment.text.as_str();

    // Number markers in text order; annotations without a usable anchor keep
    // their list order at the end.
    let mut order: Vec<usize> = (0..segment.annotations.len()).collect();
    order.sort_by_key(|&i| {
        anchor(&segment.annotations[i], text)
            .map(|(start, _)| start)
            .unwrap_or(usize::MAX)
    });

    let mut anchored: Vec<(usize, usize, String)> = Vec::new();
    let mut fallback: Vec<(String, String)> = Vec::new();
    let mut last_end = 0usize;

    for index in order {
        let annotation = &segment.annotations[index];
        let marker = format!("[{}]", pending.len() + 1);
        pending.push(PendingCitation::from_annotation(annotation, marker.clone()));

        match anchor(annotation, text) {
            Some((start, end)) if start >= last_end => {
                last_end = end;
                anchored.push((start, end, marker));
            }
            _ => {
                if !annotation.text.is_empty() {
                    fallback.push((annotation.text.clone(), marker));
                }
            }
        }
    }

    let mut rewritten = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for (start, end, marker) in anchored {
        rewritten.push_str(&text[cursor..start]);
        rewritten.push(' ');
        rewritten.push_str(&marker);
        cursor = end;
    }
    rewritten.push_str(&text[cursor..]);

    for (needle, marker) in fallback {
        rewritten = rewritten.replacen(&needle, &format!(" {}", marker), 1);
    }

    rewritten
}

/// A usable anchor is an in-bounds, non-empty, char-aligned offset range.
fn anchor(annotation: &Annotation, text: &str) -> Option<(usize, usize)> {
    let (Some(start), Some(end)) = (annotation.start_index, annotation.end_index) else {
        return None;
    };

    if start >= end || end > text.len() {
        return None;
    }

    if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
        return None;
    }

    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citation(file_id: &str, text: &str, start: Option<usize>, end: Option<usize>) -> Annotation {
        Annotation {
            text: text.to_string(),
            start_index: start,
            end_index: end,
            kind: AnnotationKind::FileCitation {
                file_id: file_id.to_string(),
                quote: Some("quoted".to_string()),
            },
        }
    }

    fn assistant_message(segments: Vec<TextSegment>) -> ThreadMessage {
        ThreadMessage {
            id: "msg_1".to_string(),
            role: MessageRole::Assistant,
            segments,
        }
    }

    #[test]
    fn test_offset_based_rewrite() {
        let text = "Refunds close after 30 days【4:0†src】.";
        let tag_start = text.find('【').unwrap();
        let tag_end = text.find('.').unwrap();
        let message = assistant_message(vec![TextSegment {
            text: text.to_string(),
            annotations: vec![citation("file-1", "【4:0†src】", Some(tag_start), Some(tag_end))],
        }]);

        let (reply, pending) = assemble_reply(&[message]);

        assert_eq!(reply, "Refunds close after 30 days [1].");
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].marker, "[1]");
        assert_eq!(pending[0].file_id, "file-1");
    }

    #[test]
    fn test_markers_are_sequential_across_segments_and_messages() {
        let first = assistant_message(vec![
            TextSegment {
                text: "One«a»".to_string(),
                annotations: vec![citation("file-1", "«a»", Some(3), Some(8))],
            },
            TextSegment {
                text: " Two«b»".to_string(),
                annotations: vec![citation("file-2", "«b»", Some(4), Some(9))],
            },
        ]);
        let second = assistant_message(vec![TextSegment {
            text: "Three«c»".to_string(),
            annotations: vec![citation("file-3", "«c»", Some(5), Some(10))],
        }]);

        let (reply, pending) = assemble_reply(&[first, second]);

        assert_eq!(reply, "One [1] Two [2]\nThree [3]");
        let markers: Vec<&str> = pending.iter().map(|p| p.marker.as_str()).collect();
        assert_eq!(markers, vec!["[1]", "[2]", "[3]"]);
    }

    #[test]
    fn test_substring_fallback_without_offsets() {
        let message = assistant_message(vec![TextSegment {
            text: "See the handbook【1†src】 for details.".to_string(),
            annotations: vec![citation("file-1", "【1†src】", None, None)],
        }]);

        let (reply, pending) = assemble_reply(&[message]);

        assert_eq!(reply, "See the handbook [1] for details.");
        assert_eq!(pending[0].file_id, "file-1");
    }

    #[test]
    fn test_out_of_bounds_offsets_fall_back_to_substring() {
        let message = assistant_message(vec![TextSegment {
            text: "Tail cite«x»".to_string(),
            annotations: vec![citation("file-1", "«x»", Some(9), Some(500))],
        }]);

        let (reply, _) = assemble_reply(&[message]);

        assert_eq!(reply, "Tail cite [1]");
    }

    #[test]
    fn test_overlapping_spans_second_falls_back() {
        let text = "alpha«1»«2»";
        let message = assistant_message(vec![TextSegment {
            text: text.to_string(),
            annotations: vec![
                citation("file-1", "«1»", Some(5), Some(10)),
                // Overlaps the first span on purpose.
                citation("file-2", "«2»", Some(8), Some(15)),
            ],
        }]);

        let (reply, pending) = assemble_reply(&[message]);

        assert_eq!(reply, "alpha [1] [2]");
        assert_eq!(pending[0].file_id, "file-1");
        assert_eq!(pending[1].file_id, "file-2");
    }

    #[test]
    fn test_annotations_numbered_by_text_position() {
        let text = "first«a» second«b»";
        let a_start = text.find("«a»").unwrap();
        let b_start = text.find("«b»").unwrap();
        let message = assistant_message(vec![TextSegment {
            text: text.to_string(),
            // Listed out of order relative to the text.
            annotations: vec![
                citation("file-b", "«b»", Some(b_start), Some(b_start + "«b»".len())),
                citation("file-a", "«a»", Some(a_start), Some(a_start + "«a»".len())),
            ],
        }]);

        let (reply, pending) = assemble_reply(&[message]);

        assert_eq!(reply, "first [1] second [2]");
        assert_eq!(pending[0].file_id, "file-a");
        assert_eq!(pending[1].file_id, "file-b");
    }

    #[test]
    fn test_non_assistant_messages_are_ignored() {
        let user = ThreadMessage {
            id: "msg_u".to_string(),
            role: MessageRole::User,
            segments: vec![TextSegment {
                text: "user text".to_string(),
                annotations: vec![],
            }],
        };

        let (reply, pending) = assemble_reply(&[user]);

        assert!(reply.is_empty());
        assert!(pending.is_empty());
    }

    #[test]
    fn test_path_annotation_has_no_quote() {
        let message = assistant_message(vec![TextSegment {
            text: "Download«p»".to_string(),
            annotations: vec![Annotation {
                text: "«p»".to_string(),
                start_index: Some(8),
                end_index: Some(13),
                kind: AnnotationKind::FilePath {
                    file_id: "file-9".to_string(),
                },
            }],
        }]);

        let (_, pending) = assemble_reply(&[message]);

        assert!(pending[0].path_citation);
        assert!(pending[0].quote.is_none());
    }
}
