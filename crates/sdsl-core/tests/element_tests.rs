//! Tests for sampler states, composes and attributes

use sdsl_core::{
    Expression, Literal, Mixin, NodeIdGen, SamplerKind, SamplerStateAssign, SdslError,
    ShaderAttribute, ShaderClass, ShaderCompose, ShaderMember, ShaderMethod, ShaderSamplerState,
    Storage, SymbolKind, SymbolType, TypeChecker, TypeName,
};
use shader_test::ShaderTest;

#[test]
fn test_sampler_state_variable() {
    let mut ids = NodeIdGen::new();
    let filter = Expression::identifier(&mut ids, "MIN_MAG_MIP_LINEAR");
    let linear = ShaderSamplerState::new(&mut ids, SamplerKind::State, "Linear")
        .with_member(SamplerStateAssign::new("Filter", filter));
    let shader = ShaderClass::new("Sampling").with_element(linear);

    let test = ShaderTest::new(&shader).unwrap();
    test.assert_instructions(
        r#"
        %1 = OpTypeSampler
        OpName %1 "SamplerState"
        %2 = OpVariable %1 UniformConstant
        OpName %2 "Linear"
    "#,
    );
    assert_eq!(test.module().bound, 3);
}

#[test]
fn test_comparison_sampler_shares_type() {
    let mut ids = NodeIdGen::new();
    let shader = ShaderClass::new("Sampling")
        .with_element(ShaderSamplerState::new(&mut ids, SamplerKind::State, "Linear"))
        .with_element(ShaderSamplerState::new(
            &mut ids,
            SamplerKind::ComparisonState,
            "Shadow",
        ));

    let test = ShaderTest::new(&shader).unwrap();
    assert_eq!(test.module().count_opcode("OpTypeSampler"), 1);
    assert_eq!(test.module().count_opcode("OpVariable"), 2);
}

#[test]
fn test_samplers_follow_members() {
    let mut ids = NodeIdGen::new();
    let shader = ShaderClass::new("Sampling")
        .with_element(ShaderSamplerState::new(&mut ids, SamplerKind::State, "Linear"))
        .with_element(ShaderMember::new(&mut ids, TypeName::new("float"), "Scale"));

    let test = ShaderTest::new(&shader).unwrap();
    test.assert_instructions(
        r#"
        %1 = OpTypeFloat 32
        OpName %1 "float"
        %2 = OpVariable %1 Function
        OpName %2 "Scale"
        %3 = OpTypeSampler
        OpName %3 "SamplerState"
        %4 = OpVariable %3 UniformConstant
        OpName %4 "Linear"
    "#,
    );
}

#[test]
fn test_sampler_is_uniform_component() {
    let mut ids = NodeIdGen::new();
    let shader = ShaderClass::new("Sampling").with_element(ShaderSamplerState::new(
        &mut ids,
        SamplerKind::ComparisonState,
        "Shadow",
    ));

    let mut checker = TypeChecker::new();
    checker.check_shader(&shader);
    let (table, diagnostics) = checker.finish();
    assert!(diagnostics.is_empty());

    let shadow = table
        .annotations()
        .shader()
        .unwrap()
        .try_get("Shadow", SymbolKind::Variable)
        .unwrap();
    assert_eq!(shadow.id.storage, Storage::Uniform);
    assert_eq!(shadow.ty, SymbolType::SamplerComparisonState);
}

#[test]
fn test_compose_is_shader_component() {
    let mut ids = NodeIdGen::new();
    let shader = ShaderClass::new("Lighting")
        .with_element(ShaderCompose::new(&mut ids, Mixin::new("ComputeColor"), "Diffuse"))
        .with_element(
            ShaderCompose::new(&mut ids, Mixin::new("LightGroup"), "Lights").array(),
        );

    let mut checker = TypeChecker::new();
    checker.check_shader(&shader);
    let (table, diagnostics) = checker.finish();
    assert!(diagnostics.is_empty());

    let symbol = table.annotations().shader().unwrap();
    let diffuse = symbol.try_get("Diffuse", SymbolKind::Compose).unwrap();
    assert_eq!(diffuse.ty.to_id(), "shader_ComputeColor");
    assert!(symbol.try_get("Lights", SymbolKind::Compose).is_some());
}

#[test]
fn test_compose_emits_nothing() {
    let mut ids = NodeIdGen::new();
    let shader = ShaderClass::new("Lighting")
        .with_element(ShaderCompose::new(&mut ids, Mixin::new("ComputeColor"), "Diffuse"));

    let test = ShaderTest::new(&shader).unwrap();
    assert!(test.module().instructions.is_empty());
    assert_eq!(test.module().bound, 1);
}

#[test]
fn test_attribute_arguments_see_members() {
    let mut ids = NodeIdGen::new();
    let limit = Expression::identifier(&mut ids, "Limit");
    let low = Expression::literal(&mut ids, Literal::Float(0.0));
    let scale = ShaderMember::new(&mut ids, TypeName::new("float"), "Scale").with_attribute(
        ShaderAttribute::new("Range").with_argument(low).with_argument(limit),
    );
    // Declared after the attribute that uses it
    let limit = ShaderMember::new(&mut ids, TypeName::new("float"), "Limit");
    let shader = ShaderClass::new("Tuned").with_element(scale).with_element(limit);

    let mut checker = TypeChecker::new();
    checker.check_shader(&shader);
    assert!(checker.diagnostics().is_empty(), "{:?}", checker.diagnostics());
}

#[test]
fn test_attribute_argument_errors() {
    let mut ids = NodeIdGen::new();
    let huge = Expression::literal(&mut ids, Literal::Int(1 << 40));
    let missing = Expression::identifier(&mut ids, "Nowhere");
    let method = ShaderMethod::new(&mut ids, TypeName::new("void"), "Foo")
        .with_attribute(ShaderAttribute::new("Tag").with_argument(huge))
        .with_body(vec![]);
    let sampler = ShaderSamplerState::new(&mut ids, SamplerKind::State, "Linear")
        .with_attribute(ShaderAttribute::new("Link").with_argument(missing));
    let shader = ShaderClass::new("Tagged").with_element(method).with_element(sampler);

    let errors = match ShaderTest::new(&shader) {
        Ok(_) => panic!("Expected attribute arguments to be rejected"),
        Err(errors) => errors,
    };
    assert_eq!(errors.len(), 2, "{:?}", errors);
    assert!(matches!(errors[0], SdslError::LiteralOutOfRange { .. }));
    assert!(matches!(
        &errors[1],
        SdslError::UndefinedVariable { name, .. } if name == "Nowhere"
    ));
}
