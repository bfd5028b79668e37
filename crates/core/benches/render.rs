use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use shiplabel_core::{
    AddressField, HtmlConfig, JsonConfig, LabelEditor, RenderOptions, Side, TextConfig, address_from_response,
    convert_to_html, convert_to_json, convert_to_text, decode_generate_content, postal_codes,
};

const INPUT: &str = "Sara Ahmed, Flat 5, Sector F-7, Islamabad 44000, +92 51 1234567";

fn bench_decode(c: &mut Criterion) {
    let body = std::fs::read_to_string("../../tests/fixtures/gemini/sara_ahmed_zip.json").unwrap();
    let text = decode_generate_content(&body).unwrap();

    c.bench_function("decode_generate_content", |b| b.iter(|| decode_generate_content(black_box(&body))));

    c.bench_function("address_from_response", |b| {
        b.iter(|| address_from_response(black_box(&text), black_box(INPUT), "Pakistan"))
    });

    c.bench_function("postal_codes", |b| b.iter(|| postal_codes(black_box(INPUT))));
}

fn bench_render(c: &mut Criterion) {
    let editor = LabelEditor::new();
    editor.edit_field(Side::Sender, AddressField::Name, "Warehouse 9");
    editor.edit_field(Side::Receiver, AddressField::Name, "Ali Khan");
    editor.edit_field(Side::Receiver, AddressField::Street1, "House 123, Street 4");
    editor.edit_field(Side::Receiver, AddressField::City, "Islamabad");
    editor.edit_field(Side::Receiver, AddressField::PhoneNumber, "0300-1234567");

    let preview = editor.preview();
    let options = RenderOptions::default();

    let mut group = c.benchmark_group("render");

    group.bench_with_input(BenchmarkId::new("text", "4x6"), &preview, |b, p| {
        b.iter(|| convert_to_text(black_box(p), &options, &TextConfig::default()))
    });

    group.bench_with_input(BenchmarkId::new("html", "4x6"), &preview, |b, p| {
        b.iter(|| convert_to_html(black_box(p), &options, &HtmlConfig::default()))
    });

    group.bench_with_input(BenchmarkId::new("json", "4x6"), &preview, |b, p| {
        b.iter(|| convert_to_json(black_box(p), &options, &JsonConfig::default()))
    });

    group.finish();
}

fn bench_preview(c: &mut Criterion) {
    let editor = LabelEditor::new();
    editor.edit_field(Side::Receiver, AddressField::Name, "Ali Khan");

    c.bench_function("preview_snapshot", |b| b.iter(|| black_box(&editor).preview()));
}

criterion_group!(benches, bench_decode, bench_render, bench_preview);
criterion_main!(benches);
