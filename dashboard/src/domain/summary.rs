//! Main-menu summary counters.

use serde::Serialize;

use crate::domain::records::{CompletedTransfer, IssuesByTransfer, Transfer, TransferStatus};
use crate::domain::{CalendarDay, normalize_timestamp};

/// Counts shown on the four main-menu summary cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCounts {
    /// Open transfers due for delivery today.
    pub todays_plan: usize,
    /// Transfers still `pending` or `in-progress`.
    pub pending: usize,
    /// Completed transfers finished today.
    pub completed_today: usize,
    /// Every issue across all transfers.
    pub issues: usize,
}

/// Compute the summary counters against `today`.
///
/// Delivery dates are compared as literal strings. Completion timestamps are
/// normalised and reduced to their UTC calendar day first; completed
/// transfers without a completion timestamp never count as completed today.
#[must_use]
pub fn compute_summary_counts(
    transfers: &[Transfer],
    completed_transfers: &[CompletedTransfer],
    issues: &IssuesByTransfer,
    today: &CalendarDay,
) -> SummaryCounts {
    let todays_plan = transfers
        .iter()
        .filter(|transfer| transfer.status != TransferStatus::Completed)
        .filter(|transfer| {
            transfer
                .delivery_date
                .as_deref()
                .is_some_and(|date| today.matches(date))
        })
        .count();
    let pending = transfers
        .iter()
        .filter(|transfer| transfer.status.is_open())
        .count();
    let completed_today = completed_transfers
        .iter()
        .filter_map(|done| done.completed_at.as_ref())
        .filter_map(|completed_at| CalendarDay::from_millis(normalize_timestamp(Some(completed_at))))
        .filter(|day| day == today)
        .count();

    SummaryCounts {
        todays_plan,
        pending,
        completed_today,
        issues: issues.len(),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::records::{Issue, TforNumber};
    use crate::domain::{Document, FetchedCollections, RecordSnapshot, Timestamp};
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn transfer(id: &str, date: Option<&str>, status: TransferStatus) -> Transfer {
        Transfer {
            id: id.to_owned(),
            tfor_number: TforNumber::new(id).ok(),
            delivery_date: date.map(str::to_owned),
            status,
            branch: None,
            created_by: None,
            created_at: None,
        }
    }

    fn completed(id: &str, completed_at: Option<Timestamp>) -> CompletedTransfer {
        CompletedTransfer {
            transfer: transfer(id, None, TransferStatus::Completed),
            completed_at,
            last_checked_by: None,
            last_received_by: None,
        }
    }

    fn issue(id: &str, tfor: &str) -> Issue {
        Issue {
            id: id.to_owned(),
            tfor_number: TforNumber::new(tfor).expect("tfor"),
            branch: None,
            reported_by: None,
            checker: None,
            report_date: None,
            created_at: None,
        }
    }

    #[fixture]
    fn today() -> CalendarDay {
        CalendarDay::new("2024-01-01")
    }

    #[rstest]
    fn todays_plan_matches_literal_dates_only(today: CalendarDay) {
        let transfers = vec![
            transfer("a", Some("2024-01-01"), TransferStatus::Pending),
            transfer("b", Some("2024-01-02"), TransferStatus::InProgress),
            transfer("c", Some("2024-01-01"), TransferStatus::Completed),
            transfer("d", Some("2024-1-1"), TransferStatus::Pending),
            transfer("e", None, TransferStatus::Pending),
        ];

        let counts = compute_summary_counts(&transfers, &[], &IssuesByTransfer::new(), &today);

        assert_eq!(counts.todays_plan, 1);
        assert_eq!(counts.pending, 4);
    }

    #[rstest]
    fn transfers_stored_without_tfor_number_are_counted(today: CalendarDay) {
        let snapshot = RecordSnapshot::from_documents(&FetchedCollections {
            transfers: vec![
                Document::from_json(
                    "t1",
                    json!({ "deliveryDate": "2024-01-01", "status": "pending" }),
                ),
                Document::from_json(
                    "t2",
                    json!({ "tforNumber": "9", "deliveryDate": "2024-01-01", "status": "pending" }),
                ),
            ],
            ..FetchedCollections::default()
        });

        let counts = compute_summary_counts(
            &snapshot.transfers,
            &snapshot.completed_transfers,
            &snapshot.issues,
            &today,
        );

        assert!(snapshot.rejected.is_empty(), "rejected: {:?}", snapshot.rejected);
        assert_eq!(counts.todays_plan, 2);
        assert_eq!(counts.pending, 2);
    }

    #[rstest]
    fn completed_today_uses_utc_day_of_completion(today: CalendarDay) {
        let completed = vec![
            // 2024-01-01T00:00:00Z
            completed("a", Some(Timestamp::from_seconds(1_704_067_200))),
            // 2024-01-01T23:59:59Z as raw millis
            completed("b", Some(Timestamp::Millis(1_704_153_599_000))),
            // 2024-01-02T00:00:00Z
            completed("c", Some(Timestamp::from_seconds(1_704_153_600))),
            completed("d", None),
        ];

        let counts = compute_summary_counts(&[], &completed, &IssuesByTransfer::new(), &today);

        assert_eq!(counts.completed_today, 2);
    }

    #[rstest]
    fn issues_are_counted_across_groups(today: CalendarDay) {
        let issues: IssuesByTransfer = [issue("i1", "1"), issue("i2", "2"), issue("i3", "1")]
            .into_iter()
            .collect();

        let counts = compute_summary_counts(&[], &[], &issues, &today);

        assert_eq!(counts.issues, 3);
    }

    #[rstest]
    fn empty_snapshot_counts_nothing(today: CalendarDay) {
        let counts = compute_summary_counts(&[], &[], &IssuesByTransfer::new(), &today);
        assert_eq!(counts, SummaryCounts::default());
    }

    #[rstest]
    fn counting_is_idempotent(today: CalendarDay) {
        let transfers = vec![transfer("a", Some("2024-01-01"), TransferStatus::Pending)];
        let first = compute_summary_counts(&transfers, &[], &IssuesByTransfer::new(), &today);
        let second = compute_summary_counts(&transfers, &[], &IssuesByTransfer::new(), &today);
        assert_eq!(first, second);
    }
}
