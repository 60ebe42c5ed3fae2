use criterion::{Criterion, criterion_group, criterion_main};
use phyloprep::model::LadderizeOrder;
use phyloprep::newick::{parse_str, to_newick};
use std::hint::black_box;

const TREE_SIZES: &[usize] = &[64, 1024];

/// Builds an unrooted-style Newick string on `n` leaves: balanced subtrees
/// below a trifurcating root, labels `A/Strain/<i>`, support values inside.
fn balanced_newick(n: usize) -> String {
    fn build(out: &mut String, first: usize, n: usize) {
        if n == 1 {
            out.push_str(&format!("A/Strain/{first}:0.0{}", first % 9 + 1));
            return;
        }
        let left = n / 2;
        out.push('(');
        build(out, first, left);
        out.push(',');
        build(out, first + left, n - left);
        out.push_str(&format!("){:.3}:0.01", 0.5 + (n % 50) as f64 / 100.0));
    }

    let third = n / 3;
    let mut out = String::from("(");
    build(&mut out, 0, third);
    out.push(',');
    build(&mut out, third, third);
    out.push(',');
    build(&mut out, 2 * third, n - 2 * third);
    out.push_str(");");
    out
}

fn newick_parsing(c: &mut Criterion) {
    for &n in TREE_SIZES {
        let newick = balanced_newick(n);
        c.bench_function(&format!("parse_n{n}"), |b| {
            b.iter(|| parse_str(black_box(&newick)).unwrap());
        });
    }
}

fn tree_postprocessing(c: &mut Criterion) {
    for &n in TREE_SIZES {
        let tree = parse_str(balanced_newick(n)).unwrap();
        let outgroup = format!("A/Strain/{}", n - 1);
        c.bench_function(&format!("reroot_ladderize_write_n{n}"), |b| {
            b.iter(|| {
                let mut tree = tree.clone();
                tree.root_with_outgroup(&outgroup).unwrap();
                tree.ladderize(LadderizeOrder::Ascending);
                black_box(to_newick(&tree))
            });
        });
    }
}

criterion_group!(benches, newick_parsing, tree_postprocessing);
criterion_main!(benches);
