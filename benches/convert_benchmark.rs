//! Benchmarks for undocx conversion performance.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::io::Cursor;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>
</Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/></w:style>
</w:styles>"#;

/// Creates a synthetic DOCX document with the given number of paragraphs.
fn create_test_docx(paragraph_count: usize) -> Vec<u8> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(PACKAGE_RELS.as_bytes()).unwrap();

    zip.start_file("word/_rels/document.xml.rels", options).unwrap();
    zip.write_all(DOCUMENT_RELS.as_bytes()).unwrap();

    zip.start_file("word/styles.xml", options).unwrap();
    zip.write_all(STYLES.as_bytes()).unwrap();

    zip.start_file("word/media/image1.png", options).unwrap();
    zip.write_all(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]).unwrap();

    let mut body = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><w:body>"#,
    );

    for i in 0..paragraph_count {
        if i % 20 == 0 {
            body.push_str(&format!(
                r#"<w:p><w:pPr><w:pStyle w:val="Heading2"/></w:pPr><w:r><w:t>Section {}</w:t></w:r></w:p>"#,
                i / 20
            ));
        }
        body.push_str(&format!(
            r#"<w:p><w:r><w:t xml:space="preserve">Paragraph {} with </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>bold</w:t></w:r><w:r><w:t xml:space="preserve"> text and https://docs.example.com/page/{} for reference.</w:t></w:r></w:p>"#,
            i, i
        ));
    }

    body.push_str(r#"<w:p><w:r><w:drawing><a:blip r:embed="rId5"/></w:drawing></w:r></w:p>"#);
    body.push_str("<w:tbl>");
    for row in 0..10 {
        body.push_str("<w:tr>");
        for col in 0..4 {
            body.push_str(&format!(
                r#"<w:tc><w:p><w:r><w:t>r{}c{}</w:t></w:r></w:p></w:tc>"#,
                row, col
            ));
        }
        body.push_str("</w:tr>");
    }
    body.push_str("</w:tbl></w:body></w:document>");

    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(body.as_bytes()).unwrap();

    zip.finish().unwrap().into_inner()
}

/// Benchmark DOCX parsing at various sizes.
fn bench_docx_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("docx_parsing");

    for para_count in [10, 100, 500, 1000].iter() {
        let data = create_test_docx(*para_count);
        let size = data.len() as u64;

        group.throughput(Throughput::Bytes(size));
        group.bench_with_input(
            BenchmarkId::new("paragraphs", para_count),
            &data,
            |b, data| {
                b.iter(|| {
                    let _ = undocx::parse_bytes(black_box(data.as_slice()));
                });
            },
        );
    }

    group.finish();
}

/// Benchmark document rendering to Markdown.
fn bench_markdown_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("markdown_rendering");
    let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    for para_count in [10, 100, 500].iter() {
        let data = create_test_docx(*para_count);
        let document = undocx::parse_bytes(&data).unwrap();

        group.bench_with_input(
            BenchmarkId::new("paragraphs", para_count),
            &document,
            |b, doc| {
                b.iter(|| {
                    let options = undocx::RenderOptions::default().with_date(date);
                    let _ = undocx::render::render_markdown(black_box(doc), "bench", &options);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark bare URL annotation.
fn bench_link_annotation(c: &mut Criterion) {
    let line = "See https://www.example.co.uk/docs and http://192.168.0.1:8080/x, then **https://sub.docs.example.com/a**.";

    c.bench_function("annotate_links", |b| {
        b.iter(|| undocx::render::annotate_links(black_box(line)));
    });
}

/// Benchmark format detection.
fn bench_format_detection(c: &mut Criterion) {
    let docx_data = create_test_docx(10);

    c.bench_function("detect_docx", |b| {
        b.iter(|| undocx::detect_format_from_bytes(black_box(&docx_data)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_docx_parsing,
    bench_markdown_rendering,
    bench_link_annotation,
);
criterion_main!(benches);
