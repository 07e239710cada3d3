use criterion::{black_box, criterion_group, criterion_main, Criterion};
use globefin::normalize::{align_years, build_exchange_rate_rows, IndicatorTable};

/// A World Bank shaped export with every country code padded around the tracked three
fn synthetic_export(countries: usize, years: std::ops::Range<i32>) -> String {
    let mut text = String::from(
        "\"Data Source\",\"World Development Indicators\",\n\n\"Last Updated Date\",\"2024-06-28\",\n\n",
    );

    text.push_str("\"Country Name\",\"Country Code\",\"Indicator Name\",\"Indicator Code\"");
    for year in years.clone() {
        text.push_str(&format!(",\"{}\"", year));
    }
    text.push_str(",\n");

    let tracked = ["SGP", "IND", "USA"];
    for i in 0..countries {
        let code = tracked.get(i).map(|c| c.to_string()).unwrap_or(format!("C{:02}", i));
        text.push_str(&format!("\"Country {}\",\"{}\",\"Rate\",\"PA.NUS.FCRF\"", i, code));
        for year in years.clone() {
            text.push_str(&format!(",\"{:.4}\"", 1.0 + (year - 1960) as f64 * 0.37 + i as f64));
        }
        text.push_str(",\n");
    }

    text
}

fn benchmark_extract(c: &mut Criterion) {
    let raw = synthetic_export(266, 1960..2024);

    c.bench_function("extract_266_countries_64_years", |b| {
        b.iter(|| {
            let table = IndicatorTable::parse(black_box(&raw), "PA.NUS.FCRF").unwrap();
            black_box(table)
        });
    });
}

fn benchmark_align(c: &mut Criterion) {
    let raw = synthetic_export(266, 1960..2024);
    let table = IndicatorTable::parse(&raw, "PA.NUS.FCRF").unwrap();

    c.bench_function("align_64_years", |b| {
        b.iter(|| black_box(align_years(black_box(&table), 1991)));
    });
}

fn benchmark_full_build(c: &mut Criterion) {
    let raw = synthetic_export(266, 1960..2024);

    c.bench_function("build_exchange_rate_rows", |b| {
        b.iter(|| {
            let rows = build_exchange_rate_rows(black_box(&raw), "PA.NUS.FCRF", 1991).unwrap();
            black_box(rows)
        });
    });
}

criterion_group!(benches, benchmark_extract, benchmark_align, benchmark_full_build);
criterion_main!(benches);
