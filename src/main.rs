fn main() {
    if std::env::var("VECALC_LOG").is_ok() {
        let env = env_logger::Env::new()
            .filter("VECALC_LOG")
            .write_style("VECALC_LOG_STYLE");
        env_logger::init_from_env(env);
    }

    vecalc::cli::run();
}
