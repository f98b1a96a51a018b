//! rekh CLI: knowledge-graph completion pipeline commands.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use rekh::classes::select_classes;
use rekh::dataset::{
    read_classes_tsv, read_contexts_txt, read_labels_txt, read_triples_txt, build_samples,
    write_classes_tsv, write_samples_tsv,
};
use rekh::fuse::fuse_all;
use rekh::ground::ground_rules;
use rekh::model::{EntId, Pred};
use rekh::registry::LabelRegistry;
use rekh::rules::{filter_by_body_length, filter_by_confidence, load_rules, sort_by_confidence};
use rekh::store::TripleStore;

#[derive(Parser)]
#[command(name = "rekh", version, about = "Knowledge-graph completion engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select the support-ranked (relation, tail) class vocabulary.
    Classes {
        /// Path to the triples txt for one partition.
        #[arg(long)]
        triples: PathBuf,

        /// Path to the entity labels txt.
        #[arg(long)]
        ent_labels: PathBuf,

        /// Path to the relation labels txt.
        #[arg(long)]
        rel_labels: PathBuf,

        /// Number of classes to keep.
        #[arg(short, long, default_value = "100")]
        k: usize,

        /// Output classes tsv.
        #[arg(long)]
        out: PathBuf,
    },

    /// Ground mined rules against a partition and write rule predictions.
    Ground {
        /// Path to the mined rules tsv.
        #[arg(long)]
        rules: PathBuf,

        /// Path to the triples txt for one partition.
        #[arg(long)]
        triples: PathBuf,

        /// Path to the entity labels txt.
        #[arg(long)]
        ent_labels: PathBuf,

        /// Path to the relation labels txt.
        #[arg(long)]
        rel_labels: PathBuf,

        /// Keep rules with confidence strictly above this threshold.
        #[arg(long, default_value = "0.8")]
        min_conf: f32,

        /// Output predictions JSON (entity → predictions).
        #[arg(long)]
        out: PathBuf,
    },

    /// Fuse text-classifier predictions with rule predictions.
    Fuse {
        /// Path to text predictions JSON (entity → predictions).
        #[arg(long)]
        text: PathBuf,

        /// Path to rule predictions JSON (entity → predictions).
        #[arg(long)]
        rules: PathBuf,

        /// Output fused predictions JSON.
        #[arg(long)]
        out: PathBuf,
    },

    /// Build multi-hot dataset samples from a partition.
    Dataset {
        /// Path to the triples txt for one partition.
        #[arg(long)]
        triples: PathBuf,

        /// Path to the classes tsv produced by `classes`.
        #[arg(long)]
        classes: PathBuf,

        /// Path to the contexts txt with sentence evidence.
        #[arg(long)]
        contexts: PathBuf,

        /// Output samples tsv.
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Classes {
            triples,
            ent_labels,
            rel_labels,
            k,
            out,
        } => {
            let registry = load_registry(&ent_labels, &rel_labels)?;
            let store = TripleStore::from_triples(read_triples_txt(&triples)?);

            let classes = select_classes(&store, k, &registry);
            write_classes_tsv(&out, &classes)?;

            println!("selected {} classes from {} triples", classes.len(), store.len());
        }

        Commands::Ground {
            rules,
            triples,
            ent_labels,
            rel_labels,
            min_conf,
            out,
        } => {
            let registry = load_registry(&ent_labels, &rel_labels)?;
            let store = TripleStore::from_triples(read_triples_txt(&triples)?);

            let load = load_rules(&rules, &registry)?;
            let mut rules = filter_by_body_length(
                filter_by_confidence(load.rules, min_conf),
                1,
            );
            sort_by_confidence(&mut rules);
            for rule in &rules {
                tracing::debug!(rule = %rule.render(&registry), "grounding rule");
            }

            let grounding = ground_rules(&store, &rules);
            write_preds_json(&out, &grounding.preds)?;

            let report = &grounding.report;
            println!(
                "grounded {} rules: {} predictions over {} entities ({} unsupported)",
                report.rules_processed,
                report.predictions,
                grounding.preds.len(),
                report.unsupported_total(),
            );
        }

        Commands::Fuse { text, rules, out } => {
            let text_preds = read_preds_json(&text)?;
            let rule_preds = read_preds_json(&rules)?;

            let fused = fuse_all(&text_preds, &rule_preds);
            write_preds_json(&out, &fused)?;

            let total: usize = fused.values().map(Vec::len).sum();
            println!("fused predictions for {} entities ({} facts)", fused.len(), total);
        }

        Commands::Dataset {
            triples,
            classes,
            contexts,
            out,
        } => {
            let store = TripleStore::from_triples(read_triples_txt(&triples)?);
            let classes = read_classes_tsv(&classes)?;
            let contexts = read_contexts_txt(&contexts)?;

            let samples = build_samples(&store, &classes, &contexts);
            write_samples_tsv(&out, &samples)?;

            println!(
                "wrote {} samples with {} label columns",
                samples.len(),
                classes.len()
            );
        }
    }

    Ok(())
}

fn load_registry(ent_labels: &PathBuf, rel_labels: &PathBuf) -> Result<LabelRegistry> {
    let ents = read_labels_txt(ent_labels)?;
    let rels = read_labels_txt(rel_labels)?;
    Ok(LabelRegistry::from_entries(ents, rels))
}

fn read_preds_json(path: &PathBuf) -> Result<BTreeMap<EntId, Vec<Pred>>> {
    let content = fs::read_to_string(path).into_diagnostic()?;
    serde_json::from_str(&content).into_diagnostic()
}

fn write_preds_json(path: &PathBuf, preds: &BTreeMap<EntId, Vec<Pred>>) -> Result<()> {
    let out = fs::File::create(path).into_diagnostic()?;
    serde_json::to_writer_pretty(out, preds).into_diagnostic()
}
