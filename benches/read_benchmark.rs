//! Benchmarks for unsheet read performance.
//!
//! Run with: cargo bench
//!
//! Workbooks are synthesised in memory at several row counts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::io::Cursor;

/// Creates a synthetic XLSX workbook with `sheet_count` sheets of `row_count`
/// data rows each. Half the columns use shared strings, half inline numbers.
fn create_test_xlsx(sheet_count: usize, row_count: usize) -> Vec<u8> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    let mut buffer = Vec::new();
    let mut zip = ZipWriter::new(Cursor::new(&mut buffer));

    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut manifest = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    let mut rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for s in 1..=sheet_count {
        manifest.push_str(&format!(
            r#"<sheet name="Sheet {s}" sheetId="{s}" r:id="rId{s}"/>"#
        ));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{s}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{s}.xml"/>"#
        ));
    }
    manifest.push_str("</sheets></workbook>");
    rels.push_str("</Relationships>");

    zip.start_file("xl/workbook.xml", options).unwrap();
    zip.write_all(manifest.as_bytes()).unwrap();
    zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
    zip.write_all(rels.as_bytes()).unwrap();

    let labels = ["Deal Stage", "Region", "Owner", "Amount", "Probability"];
    let stages = ["Live", "Lost", "Won", "Negotiation"];
    let mut sst = String::from("<sst>");
    for text in labels.iter().chain(stages.iter()) {
        sst.push_str(&format!("<si><t>{}</t></si>", text));
    }
    sst.push_str("</sst>");
    zip.start_file("xl/sharedStrings.xml", options).unwrap();
    zip.write_all(sst.as_bytes()).unwrap();

    for s in 1..=sheet_count {
        let mut sheet = String::from("<worksheet><sheetData><row r=\"1\">");
        for i in 0..labels.len() {
            sheet.push_str(&format!(r#"<c t="s"><v>{}</v></c>"#, i));
        }
        sheet.push_str("</row>");
        for r in 0..row_count {
            let stage = labels.len() + r % stages.len();
            sheet.push_str(&format!(
                r#"<row r="{}"><c t="s"><v>{}</v></c><c t="inlineStr"><is><t>EMEA</t></is></c><c t="inlineStr"><is><t>owner{}</t></is></c><c><v>{}.5</v></c><c><v>0.{}</v></c></row>"#,
                r + 2,
                stage,
                r % 17,
                r * 10,
                r % 10
            ));
        }
        sheet.push_str("</sheetData></worksheet>");

        zip.start_file(format!("xl/worksheets/sheet{s}.xml"), options)
            .unwrap();
        zip.write_all(sheet.as_bytes()).unwrap();
    }

    zip.finish().unwrap();
    buffer
}

/// Benchmark reading a single sheet at various sizes.
fn bench_single_sheet(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_sheet");

    for row_count in [100, 1_000, 10_000].iter() {
        let data = create_test_xlsx(1, *row_count);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", row_count), &data, |b, data| {
            b.iter(|| {
                let _ = unsheet::read_workbook_bytes(black_box(data));
            });
        });
    }

    group.finish();
}

/// Benchmark many-sheet workbooks, sequential against parallel decoding.
fn bench_many_sheets(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_sheets");
    let data = create_test_xlsx(8, 2_000);

    for parallel in [false, true] {
        let options = unsheet::ReadOptions::new().with_parallel(parallel);
        group.bench_with_input(
            BenchmarkId::new("parallel", parallel),
            &data,
            |b, data| {
                b.iter(|| {
                    let reader = unsheet::XlsxReader::from_bytes(black_box(data).clone())
                        .unwrap()
                        .with_options(options.clone());
                    let _ = reader.read();
                });
            },
        );
    }

    group.finish();
}

/// Benchmark JSON rendering of a decoded workbook.
fn bench_json_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("json_rendering");

    for row_count in [100, 1_000].iter() {
        let data = create_test_xlsx(1, *row_count);
        let workbook = unsheet::read_workbook_bytes(&data).unwrap();

        group.bench_with_input(
            BenchmarkId::new("rows", row_count),
            &workbook,
            |b, workbook| {
                b.iter(|| {
                    let _ = unsheet::render::to_json(
                        black_box(workbook),
                        unsheet::render::JsonFormat::Compact,
                    );
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_sheet,
    bench_many_sheets,
    bench_json_rendering,
);
criterion_main!(benches);
