use kline_scale::api::{KlineCategoryScale, KlineScaleConfig, ScaleType};
use kline_scale::core::{BoundaryKind, VisibleWindow};
use serde_json::{Value, json};

fn daily_values(dates: &[&str]) -> Vec<Value> {
    dates.iter().map(|date| json!(date)).collect()
}

#[test]
fn scale_reports_kline_type() {
    let scale = KlineCategoryScale::new(
        daily_values(&["2024-01-01", "2024-01-02"]),
        KlineScaleConfig::new("kline-day"),
    )
    .expect("scale init");
    assert_eq!(scale.scale_type(), ScaleType::Kline);
}

#[test]
fn single_month_boundary_in_daily_window() {
    let values = daily_values(&[
        "2024-01-28",
        "2024-01-29",
        "2024-01-30",
        "2024-01-31",
        "2024-02-01",
        "2024-02-02",
        "2024-02-03",
        "2024-02-04",
        "2024-02-05",
        "2024-02-06",
    ]);
    let mut scale =
        KlineCategoryScale::new(values.clone(), KlineScaleConfig::new("kline-day")).expect("init");
    scale.set_visible_window(0, 9).expect("window");

    assert_eq!(scale.tick_values(), vec![&values[4]]);
    let ticks = scale.ticks();
    assert_eq!(ticks[0].index, 4);
    assert_eq!(ticks[0].mark.kind, BoundaryKind::MonthStart);
}

#[test]
fn minute_scale_uses_stride_two_for_five_hour_dataset() {
    let marked = [3usize, 7, 11];
    let values: Vec<Value> = (0..60usize)
        .map(|i| {
            let minute = if marked.contains(&i) { 30 } else { 10 + (i % 3) * 5 };
            json!(format!("2024-05-06 {:02}:{minute:02}", i / 3))
        })
        .collect();

    let mut scale = KlineCategoryScale::new(
        values.clone(),
        KlineScaleConfig::new("kline-minutes-5"),
    )
    .expect("init");
    let marks: Vec<usize> = scale.boundary_index().iter().map(|(i, _)| i).collect();
    assert_eq!(marks, marked.to_vec());

    scale.set_visible_window(0, 12).expect("window");
    assert_eq!(scale.tick_values(), vec![&values[3], &values[11]]);

    scale.set_visible_window(0, 59).expect("window");
    assert_eq!(scale.tick_values(), vec![&values[3], &values[11]]);
}

#[test]
fn window_restricts_ticks_to_visible_marks() {
    // Month starts at 2, 5 and 8.
    let values = daily_values(&[
        "2024-01-30",
        "2024-01-31",
        "2024-02-01",
        "2024-02-15",
        "2024-02-29",
        "2024-03-01",
        "2024-03-15",
        "2024-03-31",
        "2024-04-01",
        "2024-04-02",
    ]);
    let mut scale =
        KlineCategoryScale::new(values.clone(), KlineScaleConfig::new("kline-day")).expect("init");

    scale.set_visible_window(3, 7).expect("window");
    assert_eq!(scale.tick_values(), vec![&values[5]]);

    scale.set_visible_window(0, 9).expect("window");
    assert_eq!(
        scale.tick_values(),
        vec![&values[2], &values[5], &values[8]]
    );

    scale.set_visible_window(9, 9).expect("window");
    assert!(scale.ticks().is_empty());
}

#[test]
fn week_scale_keeps_every_other_month_start() {
    let values: Vec<Value> = (1..=12)
        .flat_map(|month| {
            [
                json!(format!("2023-{month:02}-01")),
                json!(format!("2023-{month:02}-15")),
            ]
        })
        .collect();
    let scale =
        KlineCategoryScale::new(values.clone(), KlineScaleConfig::new("kline-week")).expect("init");

    let indices: Vec<usize> = scale.ticks().iter().map(|tick| tick.index).collect();
    // Month starts at 2, 4, ..., 22; stride 2 keeps 2, 6, 10, ...
    assert_eq!(indices, vec![2, 6, 10, 14, 18, 22]);
}

#[test]
fn month_scale_uses_stride_eleven() {
    let values: Vec<Value> = (0..36)
        .map(|i| {
            let year = 2020 + i / 12;
            let month = i % 12 + 1;
            json!(format!("{year}-{month:02}-28"))
        })
        .collect();
    let scale =
        KlineCategoryScale::new(values, KlineScaleConfig::new("kline-month")).expect("init");

    // Every pair crosses a month, so marks land on 1, 3, 5, ... 35.
    assert_eq!(scale.boundary_index().mark_count(), 18);
    let indices: Vec<usize> = scale.ticks().iter().map(|tick| tick.index).collect();
    assert_eq!(indices, vec![1, 23]);
}

#[test]
fn forced_offset_moves_day_start() {
    // 15:30Z, 16:00Z and 16:30Z on 2024-01-31 read as 23:30, 00:00, 00:30 at +08:00.
    let base = 1_706_715_000_000_i64;
    let values: Vec<Value> = (0..3).map(|i| json!(base + i * 30 * 60 * 1_000)).collect();
    let scale = KlineCategoryScale::new(
        values,
        KlineScaleConfig::new("kline-minutes-30").with_time_zone_offset(8 * 3600),
    )
    .expect("init");

    let marks: Vec<(usize, BoundaryKind)> = scale
        .boundary_index()
        .iter()
        .map(|(i, mark)| (i, mark.kind))
        .collect();
    assert_eq!(marks, vec![(1, BoundaryKind::DayStart)]);
    let mark = scale.boundary_index().mark(1).expect("marked");
    assert_eq!((mark.moment.month, mark.moment.day, mark.moment.hour), (2, 1, 0));
}

#[test]
fn explicit_date_format_is_applied() {
    let values = daily_values(&["31.01.2024", "01.02.2024"]);
    let scale = KlineCategoryScale::new(
        values.clone(),
        KlineScaleConfig::new("kline-day").with_date_format("%d.%m.%Y"),
    )
    .expect("init");
    assert_eq!(scale.tick_values(), vec![&values[1]]);
}

#[test]
fn empty_and_single_value_sequences_have_no_ticks() {
    let empty = KlineCategoryScale::new(Vec::new(), KlineScaleConfig::new("kline-day"))
        .expect("empty init");
    assert!(empty.is_empty());
    assert_eq!(empty.visible_window(), None);
    assert!(empty.ticks().is_empty());

    let single = KlineCategoryScale::new(
        vec![json!("2024-01-01")],
        KlineScaleConfig::new("kline-minutes-1"),
    )
    .expect("single init");
    assert_eq!(single.visible_window(), Some(VisibleWindow::new(0, 0)));
    assert!(single.ticks().is_empty());
}

#[test]
fn ticks_for_window_tolerates_degenerate_windows() {
    let values = daily_values(&["2024-01-31", "2024-02-01", "2024-02-02"]);
    let scale = KlineCategoryScale::new(values, KlineScaleConfig::new("kline-day")).expect("init");

    assert!(scale.ticks_for_window(VisibleWindow::new(2, 0)).is_empty());
    assert!(scale.ticks_for_window(VisibleWindow::new(5, 9)).is_empty());
    assert_eq!(scale.ticks_for_window(VisibleWindow::new(1, 50)).len(), 1);
}
