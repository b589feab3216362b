use duck_pond::render::shaders::SHADER_SOURCES;

#[test]
fn validate_all_shaders() {
    let mut errors = Vec::new();

    for (name, source) in SHADER_SOURCES {
        validate_shader(name, source, &mut errors);
    }

    if !errors.is_empty() {
        panic!("Shader validation failed:\n{}", errors.join("\n"));
    }
}

fn validate_shader(name: &str, source: &str, errors: &mut Vec<String>) {
    let module = match naga::front::wgsl::parse_str(source) {
        Ok(module) => module,
        Err(e) => {
            errors.push(format!("Failed to parse {}:\n{}", name, e.emit_to_string(source)));
            return;
        }
    };

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );

    if let Err(e) = validator.validate(&module) {
        errors.push(format!("Failed to validate {}:\n{:?}", name, e));
    }
}

#[test]
fn every_shader_has_both_entry_points() {
    for (name, source) in SHADER_SOURCES {
        let module = naga::front::wgsl::parse_str(source).unwrap();
        let stages: Vec<_> = module.entry_points.iter().map(|ep| (ep.name.as_str(), ep.stage)).collect();
        assert!(stages.contains(&("vs_main", naga::ShaderStage::Vertex)), "{} lacks vs_main", name);
        assert!(stages.contains(&("fs_main", naga::ShaderStage::Fragment)), "{} lacks fs_main", name);
    }
}

#[test]
fn surface_shaders_decode_to_linear_before_output() {
    use duck_pond::render::shaders::{GROUND_SHADER, WATER_SHADER};

    for (name, source) in [("water", WATER_SHADER), ("ground", GROUND_SHADER)] {
        let module = naga::front::wgsl::parse_str(source).unwrap();
        assert!(
            module.functions.iter().any(|(_, f)| f.name.as_deref() == Some("srgb_to_linear")),
            "{} lacks srgb_to_linear",
            name
        );
        let fragment = source.split("fn fs_main").nth(1).unwrap();
        assert!(fragment.contains("srgb_to_linear(color)"), "{} writes an undecoded color", name);
    }
}
