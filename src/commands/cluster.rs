use crate::cli::ClusterArgs;
use crate::cluster::{cluster, MergeProgress};
use crate::config::Config;
use crate::export::{ClusterSummary, ContigSummary, FastaExporter, SummaryParameters};
use crate::loader::load_profiles;
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::BufWriter;

pub fn run(args: ClusterArgs) -> Result<()> {
    let mut config = Config::load(args.config.as_deref())?;
    args.apply(&mut config);
    let merge_config = config.merge_config();

    let progress = ProgressBarBuilder::new("Loading reads...")
        .with_template("{spinner:.green} [{elapsed_precise}] {msg}")
        .with_tick()
        .hidden(args.quiet)
        .build()?;

    let (mut contigs, load_stats) = load_profiles(
        &args.bam_file,
        args.reference.as_deref(),
        &config.load_options(),
        &progress,
    )?;
    info!(
        "Loaded {} of {} reads ({} filtered, {} empty after trimming)",
        load_stats.loaded, load_stats.total, load_stats.filtered, load_stats.empty
    );

    let output = File::create(&args.output_file)
        .with_context(|| format!("Failed to create output file {}", args.output_file.display()))?;
    let mut exporter = FastaExporter::new(BufWriter::new(output));

    let mut summary = ClusterSummary::new(
        &args.bam_file.display().to_string(),
        SummaryParameters {
            min_overlap: config.min_overlap,
            tolerate_gaps: config.tolerate_gaps,
            tolerate_ambiguous: config.tolerate_ambiguous,
            min_reads: config.min_reads,
            min_mapping_quality: config.min_mapping_quality,
            min_base_quality: config.min_base_quality,
            mask_policy: config.mask_policy,
        },
        load_stats,
    );

    for contig in contigs.iter_mut() {
        let reads = contig.profiles.len();
        let name = contig.name.as_str();
        progress.set_message(format!("{}: clustering {} reads", name, reads));

        let outcome = cluster(
            &mut contig.profiles,
            &merge_config,
            config.min_reads,
            |p: &MergeProgress| {
                progress.set_message(format!(
                    "{}: processed {} reads ({} clusters, {} merges)",
                    name, reads, p.clusters, p.merges
                ));
            },
        )
        .with_context(|| format!("Clustering failed on {}", name))?;

        exporter
            .write_contig(name, &contig.profiles, config.min_reads)
            .with_context(|| format!("Failed to write clusters for {}", name))?;

        info!(
            "{}: {} reads -> {} clusters ({} with >= {} reads) in {} passes",
            name,
            reads,
            contig.profiles.len(),
            outcome.retained,
            config.min_reads,
            outcome.passes
        );
        summary.add_contig(ContigSummary::new(name, reads, contig.profiles.len(), &outcome));
    }

    let written = exporter.written();
    exporter
        .finish()
        .with_context(|| format!("Failed to write {}", args.output_file.display()))?;

    if let Some(summary_path) = &args.summary {
        summary.save(summary_path)?;
    }

    progress.finish_with_message(format!(
        "Wrote {} clusters to {}",
        written,
        args.output_file.display()
    ));
    info!(
        "{} clusters total, {} retained",
        summary.total_clusters, summary.retained_clusters
    );

    Ok(())
}
