use crate::config::DevConfig;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Next steps shown after a successful `up`
pub fn render_instructions(config: &DevConfig) -> String {
    let context = config.context_name();
    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str("Keel development cluster is ready\n");
    out.push_str(RULE);
    out.push_str("\n\n");
    out.push_str(&format!("  Cluster:  {}\n", config.cluster_name));
    out.push_str(&format!("  Context:  {}\n\n", context));
    out.push_str("Next steps:\n");
    out.push_str(&format!("  1. Build Keel:         {}\n", config.build_command));
    out.push_str(&format!(
        "  2. Point kubectl here: kubectl config use-context {}\n",
        context
    ));
    out.push_str("  3. Watch workloads:    kubectl get pods -A\n\n");
    out.push_str(&format!(
        "To delete the cluster: keel-dev down  (or: kind delete cluster --name {})\n",
        config.cluster_name
    ));
    out
}

pub fn print_instructions(config: &DevConfig) {
    println!();
    print!("{}", render_instructions(config));
}
