use clap::{CommandFactory, Parser};
use ini2xml::domain::ports::ConfigProvider;
use ini2xml::utils::{logger, validation::Validate};
use ini2xml::{
    CliConfig, ConversionEngine, ConversionSettings, ConvertError, IniXmlPipeline, LocalStorage,
    TomlConfig,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    if !cli.has_paths() && cli.config.is_none() {
        CliConfig::command().print_long_help()?;
        return Ok(());
    }

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => fail(e),
    };
    tracing::debug!("Settings: {:?}", settings);

    let storage = LocalStorage::new(std::env::current_dir()?);
    let engine = ConversionEngine::new(IniXmlPipeline::new(storage, settings));

    if cli.dry_run {
        tracing::info!("Dry run: no file will be written");
        match engine.dry_run() {
            Ok(result) => {
                let pipeline = engine.pipeline();
                println!("Input:      {}", pipeline.settings().input);
                println!("Output:     {} (not written)", pipeline.settings().output);
                if let Some(pattern) = pipeline.pattern() {
                    let status = if pattern.is_usable() { "" } else { " (never matches)" };
                    println!("Pattern:    {}{}", pattern.as_str(), status);
                }
                println!("Sections:   {}", result.section_count);
                println!("Properties: {}", result.property_count);
                println!("Groups:     {}", result.group_count);
            }
            Err(e) => fail(e),
        }
        return Ok(());
    }

    match engine.run() {
        Ok(output_path) => {
            tracing::info!("Conversion completed: {}", output_path);
        }
        Err(e) => fail(e),
    }

    Ok(())
}

fn load_settings(cli: &CliConfig) -> ini2xml::Result<ConversionSettings> {
    let file = cli.config.as_deref().map(TomlConfig::from_file).transpose()?;

    let mut providers: Vec<&dyn ConfigProvider> = Vec::new();
    providers.push(cli);
    if let (Some(path), Some(file)) = (cli.config.as_deref(), file.as_ref()) {
        tracing::info!("Loaded configuration from {}", path);
        providers.push(file);
    }

    let settings = ConversionSettings::resolve(&providers)?;
    settings.validate()?;
    settings.absolutize()
}

fn fail(e: ConvertError) -> ! {
    tracing::error!(
        "Conversion failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("error: {}", e.user_friendly_message());
    eprintln!("hint: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
