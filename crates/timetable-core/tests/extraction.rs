//! End-to-end extraction tests over realistic timetable grids.

use timetable_core::*;

fn grid(rows: &[&[&str]]) -> Matrix {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                .collect()
        })
        .collect()
}

/// A two-week, row-oriented timetable for class 10А as it comes out of the
/// table extractor: title row, header row, parity + hour columns, a split
/// English lesson and a double chemistry lesson.
fn class_10a() -> Matrix {
    grid(&[
        &["Расписание 10А", "", "", "", "", ""],
        &["Неделя", "Урок", "Пн", "", "Ср", "Пт"],
        &[
            "1",
            "1",
            "Английский 10А.1 201 Смирнова А.В.",
            "Английский 10А.2 202 Орлова О.О.",
            "Химия 305 Петрова Е.Н.",
            "Физкультура 101, 102",
        ],
        &["", "2", "Алгебра 210 Иванов И.И.", "", "", "История 104"],
        &["", "3", "Литература\n207", "", "Физика 10А.1 Петров П.П.", ""],
        &["2", "1", "Геометрия 210 Иванов И.И.", "", "", "Биология 302"],
    ])
}

#[test]
fn header_row_reported_with_no_column() {
    let layout = detect_matrix(&class_10a()).unwrap().unwrap();
    assert_eq!(layout.row_index(), Some(1));
    assert_eq!(layout.column_index(), None);
    assert_eq!(layout.weekday_ordinals(), vec![0, 2, 4]);
}

#[test]
fn header_column_reported_with_no_row() {
    let m = grid(&[
        &["", "", "1", "2"],
        &["1", "Вторник", "Химия", "Физика"],
        &["", "Четверг", "Алгебра", ""],
    ]);
    let layout = detect_matrix(&m).unwrap().unwrap();
    assert_eq!(layout.column_index(), Some(1));
    assert_eq!(layout.row_index(), None);
}

#[test]
fn full_two_week_timetable() {
    let pages = vec![PageContent::Tables(vec![class_10a()])];
    let index = parse_document(&pages, Some("10А")).unwrap();

    assert_eq!(index.week_list(), vec![1, 2]);
    assert_eq!(
        index.day_of_week_list(1),
        vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday]
    );
    assert_eq!(
        index.day_of_week_list(2),
        vec![Weekday::Monday, Weekday::Friday]
    );

    let monday = index.lesson_list(1, Weekday::Monday);
    assert_eq!(monday.len(), 3);
    assert_eq!(monday[0].subject, "Английский");
    assert_eq!(monday[0].group, "10А.1");
    assert_eq!(monday[0].groups.len(), 1);
    assert_eq!(monday[0].groups[0].group, "10А.2");
    assert_eq!(monday[0].groups[0].teacher, "Орлова О.О.");
    assert_eq!(monday[1].subject, "Алгебра");
    assert_eq!(monday[2].subject, "Литература");
    assert_eq!(monday[2].room, "207");

    // Химия spans hours 1-2, the empty hour-2 cell below it is a continuation
    let wednesday = index.lesson_list(1, Weekday::Wednesday);
    assert_eq!(wednesday.len(), 2);
    assert_eq!(wednesday[0].subject, "Химия");
    assert_eq!(wednesday[0].hour_end, "2");
    assert_eq!(wednesday[1].subject, "Физика");
    assert_eq!(wednesday[1].group, "10А.1");

    let friday = index.lesson_list(1, Weekday::Friday);
    assert_eq!(friday[0].room, "101, 102");
    assert_eq!(friday[1].subject, "История");
    assert_eq!(friday[1].hour_end, "3");
}

#[test]
fn continuation_merges_into_one_lesson() {
    let m = grid(&[&["", "Пн"], &["1", "Химия 305"], &["2", ""]]);
    let index = parse_document(&[PageContent::Tables(vec![m])], None).unwrap();
    assert_eq!(index.len(), 1);
    let lesson = &index.lesson_list(1, Weekday::Monday)[0];
    assert_eq!(lesson.ident.hour_start, "1");
    assert_eq!(lesson.hour_end, "2");
}

#[test]
fn same_ident_never_duplicates_top_level() {
    let m = grid(&[&["", "Вт", ""], &["1", "Труд 1 группа", "Труд 2 группа"]]);
    let index = parse_document(&[PageContent::Tables(vec![m])], None).unwrap();
    assert_eq!(index.len(), 1);
    let tuesday = index.lesson_list(1, Weekday::Tuesday);
    assert_eq!(tuesday.len(), 1);
    assert_eq!(tuesday[0].groups.len(), 1);
}

#[test]
fn day_list_sorted_when_headers_discovered_out_of_order() {
    let m = grid(&[&["", "Ср", "Пн", "Пт"], &["1", "Химия", "Физика", "Алгебра"]]);
    let index = parse_document(&[PageContent::Tables(vec![m])], None).unwrap();
    let labels: Vec<&str> = index
        .day_of_week_list(1)
        .into_iter()
        .map(Weekday::label)
        .collect();
    assert_eq!(labels, ["Понедельник", "Среда", "Пятница"]);
}

#[test]
fn page_without_weekdays_is_a_layout_error() {
    let m = grid(&[&["1", "Химия"], &["2", "Физика"]]);
    let err = parse_document(&[PageContent::Tables(vec![m])], None).unwrap_err();
    assert_eq!(err.layout(), Some(&TableLayoutError::HeadersNotFound));
    assert!(err.to_string().contains("weekday headers not found"));
}

#[test]
fn ambiguous_page_is_a_layout_error() {
    let m = grid(&[&["Пн", "Химия"], &["Физика", "Вт"]]);
    let err = parse_document(&[PageContent::Tables(vec![m])], None).unwrap_err();
    assert_eq!(err.layout(), Some(&TableLayoutError::AmbiguousOrientation));
}

#[test]
fn rendered_day_lists_hours_in_order() {
    let pages = vec![PageContent::Tables(vec![class_10a()])];
    let index = parse_document(&pages, Some("10А")).unwrap();
    let text = render_day(
        &index.lesson_list(1, Weekday::Wednesday),
        &RenderOptions::default(),
    );
    assert_eq!(
        text,
        "1-2 Химия, каб. 305, Петрова Е.Н.\n3 Физика, 10А.1, Петров П.П."
    );
}

#[cfg(feature = "serde")]
#[test]
fn index_survives_json_round_trip() {
    let pages = vec![PageContent::Tables(vec![class_10a()])];
    let index = parse_document(&pages, Some("10А")).unwrap();
    let json = serde_json::to_string(&index).unwrap();
    let restored: ScheduleIndex = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, index);
}
