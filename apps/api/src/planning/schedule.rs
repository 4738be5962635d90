//! Schedule allocation for generated posts and comments.
//!
//! Posts land on the first five days of the week regardless of volume, in a
//! morning-to-early-afternoon window. Comments trail their post by a growing
//! offset with a little jitter; only "strictly after the post" is guaranteed,
//! not ordering between sibling comments. Two posts may share a minute —
//! callers must not assume `scheduled_time` is unique.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rand::Rng;

/// Day offsets cycle over the first five days of the week.
const POSTING_DAYS: i64 = 5;

/// Posts are scheduled between 09:00 and 13:59.
const FIRST_POSTING_HOUR: i64 = 9;
const POSTING_HOUR_SPREAD: i64 = 5;

/// Picks the timestamp for the post at `post_index`.
pub fn allocate_post_time(
    week_start: NaiveDate,
    post_index: usize,
    rng: &mut impl Rng,
) -> DateTime<Utc> {
    let day = week_start + Duration::days(post_index as i64 % POSTING_DAYS);
    let hour = FIRST_POSTING_HOUR + rng.gen_range(0..POSTING_HOUR_SPREAD);
    let minute = rng.gen_range(0..60);

    (day.and_time(NaiveTime::MIN) + Duration::hours(hour) + Duration::minutes(minute)).and_utc()
}

/// 2 or 3 comments per post, uniform.
pub fn comment_count(rng: &mut impl Rng) -> usize {
    2 + rng.gen_range(0..2)
}

/// Picks the timestamp for comment `comment_index` under a post:
/// 5 + i*15 minutes after the post, plus up to 9 minutes of jitter.
pub fn allocate_comment_time(
    post_time: DateTime<Utc>,
    comment_index: usize,
    rng: &mut impl Rng,
) -> DateTime<Utc> {
    let offset_minutes = 5 + comment_index as i64 * 15 + rng.gen_range(0..10);
    post_time + Duration::minutes(offset_minutes)
}
