//! Benchmarks for the hot callback paths
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ecofood::callbacks::{stakeholders, supply};
use ecofood::data::{GroupingKey, StakeholderDirectory, SupplyFlows, Table};

const SECTORS: [&str; 4] = ["Private", "Public", "NGO", "Academic"];
const AREAS: [&str; 3] = ["Production", "Distribution", "Consumption"];
const PROVINCES: [&str; 6] = ["Thai Binh", "Nam Dinh", "Ha Nam", "Hai Duong", "Bac Ninh", "Hung Yen"];

fn directory(count: usize) -> StakeholderDirectory {
    let mut csv = String::from(
        "Organization,Primary sector,Area of Activity,Scale of Activity,Website\n",
    );
    for i in 0..count {
        csv.push_str(&format!(
            "Org {i},{},{},Local,https://org{i}.example\n",
            SECTORS[i % SECTORS.len()],
            AREAS[i % AREAS.len()],
        ));
    }
    let table = Table::from_reader("bench.csv", csv.as_bytes()).unwrap();
    StakeholderDirectory::from_table(table)
}

fn flows() -> SupplyFlows {
    let mut csv = String::from("Year,province,Target,Supply to Hanoi,Target_1,Rice supply\n");
    for year in (2010..=2022).step_by(2) {
        for (i, province) in PROVINCES.iter().enumerate() {
            let supplied = 100.0 + i as f64 * 10.0;
            csv.push_str(&format!(
                "{year},{province},Hanoi,{supplied},Hanoi urban,{}\n",
                supplied * 0.6
            ));
            csv.push_str(&format!(
                "{year},{province},Hanoi,{supplied},Hanoi rural,{}\n",
                supplied * 0.4
            ));
        }
    }
    let table = Table::from_reader("supply.csv", csv.as_bytes()).unwrap();
    SupplyFlows::from_table(&table).unwrap()
}

fn bench_stakeholders(c: &mut Criterion) {
    let mut group = c.benchmark_group("stakeholders");

    for size in [100, 1000] {
        let directory = directory(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("value_counts_{}", size), |b| {
            b.iter(|| directory.value_counts(black_box(GroupingKey::Sector)))
        });

        group.bench_function(format!("filter_records_{}", size), |b| {
            b.iter(|| {
                let matches = directory.filter(GroupingKey::Area, black_box("Production"));
                directory.to_records(matches)
            })
        });

        let counts = directory.value_counts(GroupingKey::Sector);
        group.bench_function(format!("pie_figure_{}", size), |b| {
            b.iter(|| stakeholders::pie_figure(black_box(&counts), Some("Public")))
        });
    }

    group.finish();
}

fn bench_supply(c: &mut Criterion) {
    let mut group = c.benchmark_group("supply");
    let flows = flows();

    group.bench_function("graph", |b| b.iter(|| flows.graph(black_box(2022))));

    let graph = flows.graph(2022);
    group.bench_function("sankey_figure", |b| {
        b.iter(|| supply::sankey_figure(black_box(&graph)))
    });

    group.finish();
}

criterion_group!(benches, bench_stakeholders, bench_supply);
criterion_main!(benches);
