//! Comment and revision output formatting.

use feedfactory_api::prelude::{Comment, Revision};

/// Formats editor comments, one block per comment.
pub fn format_comments(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return "No comments.\n".to_string();
    }

    comments
        .iter()
        .map(|c| format!("[{}] {}:\n  {}\n\n", c.created, c.author, c.text))
        .collect()
}

/// Formats revision history, one line per revision.
pub fn format_revisions(revisions: &[Revision]) -> String {
    if revisions.is_empty() {
        return "No revisions.\n".to_string();
    }

    revisions
        .iter()
        .map(|r| {
            if r.comment.is_empty() {
                format!("[{}] {}\n", r.created, r.author)
            } else {
                format!("[{}] {} - {}\n", r.created, r.author, r.comment)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_comments() {
        assert_eq!(format_comments(&[]), "No comments.\n");
    }

    #[test]
    fn test_comment_block() {
        let comments = vec![Comment {
            id: "c1".to_string(),
            text: "Check the date".to_string(),
            author: "ann".to_string(),
            created: "2026-01-02".to_string(),
        }];
        assert_eq!(
            format_comments(&comments),
            "[2026-01-02] ann:\n  Check the date\n\n"
        );
    }

    #[test]
    fn test_revisions_with_and_without_comment() {
        let revisions = vec![
            Revision {
                author: "ann".to_string(),
                created: "2026-01-02".to_string(),
                comment: "fixed title".to_string(),
                ..Default::default()
            },
            Revision {
                author: "bob".to_string(),
                created: "2026-01-03".to_string(),
                ..Default::default()
            },
        ];
        assert_eq!(
            format_revisions(&revisions),
            "[2026-01-02] ann - fixed title\n[2026-01-03] bob\n"
        );
        assert_eq!(format_revisions(&[]), "No revisions.\n");
    }
}
