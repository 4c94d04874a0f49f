use chrono::Utc;
use lunisolar::{CalendarConfig, LunarCalendar, MonthBoundary, Time, TT, UT};

fn main() -> Result<(), lunisolar::CalendarError> {
    let now = Utc::now();
    let now_ut = Time::<UT>::from_utc(now);
    let now_tt: Time<TT> = now_ut.to::<TT>();

    println!("UT: {now_ut}");
    println!("TT: {now_tt}");
    println!("ΔT: {}", now_ut.delta_t());

    let calendar = LunarCalendar::memoized(
        CalendarConfig::default().with_month_boundary(MonthBoundary::CivilDay),
    )?;
    println!("Lunar date: {}", calendar.solar_to_lunar(now)?);

    let year = calendar.lunar_year(now_ut.calendar_year() - 1)?;
    for month in year.months() {
        let leap = if month.is_leap { "leap " } else { "" };
        let start = month.span.to_utc().map(|span| span.start.to_rfc3339());
        println!(
            "{leap}{:>2}: {} ({} days)",
            month.ordinal,
            start.unwrap_or_default(),
            month.length_days(year.civil_offset_hours())
        );
    }
    Ok(())
}
