//! Performance benchmarks for timetable assembly.
//!
//! Covers cell parsing on its own and full document assembly for a
//! row-oriented and a column-oriented two-week timetable.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use timetable_core::{CellParser, Matrix, PageContent, parse_document};

const CELLS: [&str; 6] = [
    "Математика 204 Иванов И.И.",
    "Английский 10А.1 201 Смирнова А.В.",
    "Английский 10А.2 202 Орлова О.О.",
    "Физкультура 101, 102",
    "Литература\n207\nСидорова С.С.",
    "",
];

fn row_oriented(hours: usize) -> Matrix {
    let mut rows: Matrix = vec![
        ["", "", "Пн", "", "Вт", "Ср", "Чт", "Пт", "Сб"]
            .iter()
            .map(|s| (!s.is_empty()).then(|| s.to_string()))
            .collect(),
    ];
    for week in 1..=2 {
        for hour in 1..=hours {
            let mut row = vec![
                (hour == 1).then(|| week.to_string()),
                Some(hour.to_string()),
            ];
            for col in 0..7 {
                let text = CELLS[(hour + col + week) % CELLS.len()];
                row.push((!text.is_empty()).then(|| text.to_string()));
            }
            rows.push(row);
        }
    }
    rows
}

fn column_oriented(hours: usize) -> Matrix {
    let mut header = vec![None, None];
    header.extend((1..=hours).map(|h| Some(h.to_string())));
    let mut rows: Matrix = vec![header];
    for day in ["Понедельник", "Вторник", "Среда", "Четверг", "Пятница"] {
        for week in 1..=2 {
            let mut row = vec![
                Some(week.to_string()),
                (week == 1).then(|| day.to_string()),
            ];
            for hour in 0..hours {
                let text = CELLS[(hour + week + day.len()) % CELLS.len()];
                row.push((!text.is_empty()).then(|| text.to_string()));
            }
            rows.push(row);
        }
    }
    rows
}

fn bench_cell_parser(c: &mut Criterion) {
    let parser = CellParser::new(Some("10А"));
    c.bench_function("cell_parser/6_cells", |b| {
        b.iter(|| {
            for cell in CELLS {
                black_box(parser.parse(black_box(cell)));
            }
        })
    });
}

fn bench_assembly(c: &mut Criterion) {
    let rows = vec![PageContent::Tables(vec![row_oriented(8)])];
    c.bench_function("assemble/row_oriented_2x8", |b| {
        b.iter(|| black_box(parse_document(black_box(&rows), Some("10А"))))
    });

    let columns = vec![PageContent::Tables(vec![column_oriented(8)])];
    c.bench_function("assemble/column_oriented_2x8", |b| {
        b.iter(|| black_box(parse_document(black_box(&columns), Some("10А"))))
    });
}

criterion_group!(benches, bench_cell_parser, bench_assembly);
criterion_main!(benches);
