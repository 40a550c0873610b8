//! Read exported workbooks back and check their layout cell by cell.

use calamine::{Data, DataType, Reader, Xlsx};
use chrono::NaiveDate;
use finview::error::ReportError;
use finview::export::{export_xlsx, SpreadsheetExporter, EXPORT_COLUMNS};
use finview::models::TimeSeriesRow;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::{Cursor, Read};

fn row(day: u32, open: Decimal, high: Decimal, low: Decimal, close: Decimal, volume: Decimal) -> TimeSeriesRow {
    TimeSeriesRow::new(
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        open,
        high,
        low,
        close,
        volume,
    )
}

fn sample_rows() -> Vec<TimeSeriesRow> {
    vec![
        row(1, dec!(99), dec!(101), dec!(98), dec!(100), dec!(1200)),
        row(2, dec!(100), dec!(111), dec!(99.5), dec!(110), dec!(3400)),
        row(3, dec!(110), dec!(112), dec!(104), dec!(104.5), dec!(2500000)),
        row(4, dec!(1.08451), dec!(1.0912), dec!(1.0801), dec!(1.0876), dec!(0)),
    ]
}

fn open_sheet(bytes: Vec<u8>) -> (Vec<String>, calamine::Range<Data>) {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).expect("valid xlsx");
    let names = workbook.sheet_names().to_vec();
    let range = workbook
        .worksheet_range(&names[0])
        .expect("first sheet readable");
    (names, range)
}

fn package_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("xlsx is a zip");
    let mut part = archive.by_name(name).expect("part present");
    let mut text = String::new();
    part.read_to_string(&mut text).expect("utf-8 part");
    text
}

fn number(range: &calamine::Range<Data>, r: usize, c: usize) -> f64 {
    range
        .get((r, c))
        .and_then(|cell| cell.as_f64())
        .unwrap_or_else(|| panic!("cell ({}, {}) is not numeric", r, c))
}

#[test]
fn header_and_column_order() {
    let (_, range) = open_sheet(export_xlsx(&sample_rows(), "Bitcoin").unwrap());

    let header: Vec<String> = range
        .rows()
        .next()
        .unwrap()
        .iter()
        .map(|c| c.to_string())
        .collect();
    assert_eq!(
        header,
        vec!["Date", "Price", "High", "Low", "Open", "Variation (%)", "Volume"]
    );
    assert_eq!(header, EXPORT_COLUMNS.to_vec());
}

#[test]
fn one_sheet_row_per_input_row_plus_header() {
    let rows = sample_rows();
    let (_, range) = open_sheet(export_xlsx(&rows, "Bitcoin").unwrap());

    assert_eq!(range.height(), rows.len() + 1);
    assert_eq!(range.width(), 7);
}

#[test]
fn cells_hold_raw_values_in_export_order() {
    let rows = sample_rows();
    let (_, range) = open_sheet(export_xlsx(&rows, "Bitcoin").unwrap());

    assert_eq!(range.get((2, 0)), Some(&Data::String("2024-01-02".to_string())));
    // Price (close), High, Low, Open
    assert_eq!(number(&range, 2, 1), 110.0);
    assert_eq!(number(&range, 2, 2), 111.0);
    assert_eq!(number(&range, 2, 3), 99.5);
    assert_eq!(number(&range, 2, 4), 100.0);
    assert_eq!(number(&range, 2, 6), 3400.0);
    assert_eq!(number(&range, 3, 6), 2500000.0);

    // Full precision survives, unlike the on-screen table
    assert!((number(&range, 4, 4) - 1.08451).abs() < 1e-12);
    assert_eq!(number(&range, 4, 6), 0.0);
}

#[test]
fn variation_is_a_fraction_and_blank_on_first_row() {
    let (_, range) = open_sheet(export_xlsx(&sample_rows(), "Bitcoin").unwrap());

    assert!(matches!(range.get((1, 5)), None | Some(Data::Empty)));
    assert!((number(&range, 2, 5) - 0.10).abs() < 1e-12);
    assert!((number(&range, 3, 5) - (-0.05)).abs() < 1e-12);
}

#[test]
fn variation_uses_percent_number_format() {
    let bytes = export_xlsx(&sample_rows(), "Bitcoin").unwrap();
    let styles = package_part(&bytes, "xl/styles.xml");

    // "0.00%" is built-in format 10
    assert!(styles.contains(r#"numFmtId="10""#) || styles.contains(r#"formatCode="0.00%""#));
}

#[test]
fn columns_have_fixed_width() {
    let bytes = SpreadsheetExporter::with_column_width(15.0)
        .export(&sample_rows(), "Bitcoin")
        .unwrap();
    let sheet = package_part(&bytes, "xl/worksheets/sheet1.xml");

    assert!(sheet.contains("<cols>"));
    assert!(sheet.contains(r#"customWidth="1""#));
}

#[test]
fn round_trip_two_rows() {
    let rows = vec![
        row(1, dec!(100), dec!(100), dec!(100), dec!(100), dec!(1)),
        row(2, dec!(100), dec!(110), dec!(100), dec!(110), dec!(1)),
    ];
    let (_, range) = open_sheet(export_xlsx(&rows, "Round trip").unwrap());

    assert_eq!(range.height(), 3);
    assert!((number(&range, 2, 5) - 0.10).abs() < 1e-12);
}

#[test]
fn sheet_name_is_sanitized_and_truncated() {
    let (names, _) = open_sheet(export_xlsx(&sample_rows(), "EUR/USD").unwrap());
    assert_eq!(names, vec!["EUR_USD".to_string()]);

    let label = "Bristol-Myers Squibb: long label=yes";
    let (names, _) = open_sheet(export_xlsx(&sample_rows(), label).unwrap());
    assert_eq!(names[0], "Bristol-Myers Squibb_ long labe");
    assert_eq!(names[0].chars().count(), 31);
}

#[test]
fn empty_rows_produce_no_document() {
    assert_eq!(export_xlsx(&[], "Bitcoin"), Err(ReportError::empty()));
}
