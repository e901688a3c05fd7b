use chrono::{
  NaiveDate,
  Utc
};
use chrono_tz::Tz;

/// Days left before a task is due, as shown next to its title.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum DueBadge {
  Overdue,
  Urgent(i64),
  Upcoming(i64)
}

impl DueBadge {
  pub fn compute(
    due: Option<NaiveDate>,
    today: NaiveDate
  ) -> Option<Self> {
    let due = due?;
    let days = due
      .signed_duration_since(today)
      .num_days();

    Some(if days <= 0 {
      DueBadge::Overdue
    } else if days < 3 {
      DueBadge::Urgent(days)
    } else {
      DueBadge::Upcoming(days)
    })
  }

  pub fn text(&self) -> String {
    match self {
      | DueBadge::Overdue => {
        "Atrasado".to_string()
      }
      | DueBadge::Urgent(days)
      | DueBadge::Upcoming(days) => {
        format!("{days} dias")
      }
    }
  }

  pub fn is_urgent(&self) -> bool {
    !matches!(self, DueBadge::Upcoming(_))
  }

  pub fn variant(&self) -> &'static str {
    if self.is_urgent() {
      "destructive"
    } else {
      "default"
    }
  }
}

pub fn parse_timezone(
  name: &str
) -> Option<Tz> {
  match name.trim().parse::<Tz>() {
    | Ok(tz) => Some(tz),
    | Err(error) => {
      tracing::warn!(
        timezone = name,
        %error,
        "unknown timezone; using local \
         date"
      );
      None
    }
  }
}

/// Today's calendar date in `tz`, or in the host's local zone.
pub fn today_in(
  tz: Option<Tz>
) -> NaiveDate {
  match tz {
    | Some(tz) => {
      Utc::now()
        .with_timezone(&tz)
        .date_naive()
    }
    | None => {
      chrono::Local::now().date_naive()
    }
  }
}
