//! Tests for method compilation: skeletons, entry points, parameters and bodies

use sdsl_core::{
    BinaryOperator, EntryPoint, Expression, Literal, MethodParameter, MethodState, NodeIdGen,
    ShaderClass, ShaderMember, ShaderMethod, Statement, TypeName,
};
use shader_test::ShaderTest;

#[test]
fn test_vertex_entry_point_skeleton() {
    let mut ids = NodeIdGen::new();
    let shader = ShaderClass::new("Basic")
        .with_element(ShaderMethod::new(&mut ids, TypeName::new("void"), "VSMain").with_body(vec![]));

    let test = ShaderTest::new(&shader).unwrap();
    test.assert_instructions(
        r#"
        %1 = OpTypeVoid
        OpName %1 "void"
        %2 = OpTypeFunction %1
        OpName %2 "fn_void"
        OpEntryPoint Vertex %3 "VSMain"
        %3 = OpFunction %1 None %2
        OpName %3 "VSMain"
        %4 = OpLabel
        OpReturn
        OpFunctionEnd
    "#,
    );
    assert_eq!(test.module().bound, 5);

    let record = test.function("VSMain");
    assert_eq!(record.entry_point, Some(EntryPoint::VertexShader));
    assert_eq!(record.state, MethodState::Finalized);
}

#[test]
fn test_plain_method_has_no_entry_point() {
    let mut ids = NodeIdGen::new();
    let shader = ShaderClass::new("Basic")
        .with_element(ShaderMethod::new(&mut ids, TypeName::new("void"), "Foo").with_body(vec![]));

    let test = ShaderTest::new(&shader).unwrap();
    test.assert_instructions(
        r#"
        %1 = OpTypeVoid
        OpName %1 "void"
        %2 = OpTypeFunction %1
        OpName %2 "fn_void"
        %3 = OpFunction %1 None %2
        OpName %3 "Foo"
        %4 = OpLabel
        OpReturn
        OpFunctionEnd
    "#,
    );
    assert_eq!(test.function("Foo").entry_point, None);
    assert_eq!(test.module().count_opcode("OpEntryPoint"), 0);
}

#[test]
fn test_every_entry_point_name() {
    let mut ids = NodeIdGen::new();
    let mut shader = ShaderClass::new("Stages");
    for name in ["VSMain", "PSMain", "CSMain", "GSMain", "DSMain", "HSMain"] {
        shader = shader
            .with_element(ShaderMethod::new(&mut ids, TypeName::new("void"), name).with_body(vec![]));
    }

    let test = ShaderTest::new(&shader).unwrap();
    assert_eq!(test.module().count_opcode("OpEntryPoint"), 6);
    assert_eq!(test.function("PSMain").entry_point, Some(EntryPoint::PixelShader));
    assert_eq!(test.function("CSMain").entry_point, Some(EntryPoint::ComputeShader));
    assert_eq!(test.function("GSMain").entry_point, Some(EntryPoint::GeometryShader));
    assert_eq!(test.function("DSMain").entry_point, Some(EntryPoint::DomainShader));
    assert_eq!(test.function("HSMain").entry_point, Some(EntryPoint::HullShader));
}

#[test]
fn test_method_without_body() {
    let mut ids = NodeIdGen::new();
    let shader = ShaderClass::new("Abstract")
        .with_element(ShaderMethod::new(&mut ids, TypeName::new("float"), "Compute"));

    let test = ShaderTest::new(&shader).unwrap();
    test.assert_function(
        "Compute",
        r#"
        %3 = OpFunction %1 None %2
        OpName %3 "Compute"
        OpFunctionEnd
    "#,
    );
    assert_eq!(test.module().count_opcode("OpLabel"), 0);
    assert_eq!(test.function("Compute").state, MethodState::Finalized);
}

#[test]
fn test_method_with_parameter() {
    let mut ids = NodeIdGen::new();
    let x = Expression::identifier(&mut ids, "x");
    let two = Expression::literal(&mut ids, Literal::Float(2.0));
    let product = Expression::binary(&mut ids, BinaryOperator::Mul, x, two);
    let scale = ShaderMethod::new(&mut ids, TypeName::new("float"), "Scale")
        .with_parameter(MethodParameter::new(&mut ids, TypeName::new("float"), "x"))
        .with_body(vec![Statement::ret(Some(product))]);
    let shader = ShaderClass::new("Math").with_element(scale);

    let test = ShaderTest::new(&shader).unwrap();
    test.assert_instructions(
        r#"
        %1 = OpTypeFloat 32
        OpName %1 "float"
        %2 = OpTypeFunction %1 %1
        OpName %2 "fn_float_float"
        %3 = OpFunction %1 None %2
        OpName %3 "Scale"
        %4 = OpFunctionParameter %1
        OpName %4 "x"
        %5 = OpLabel
        %6 = OpConstant %1 2.0
        %7 = OpFMul %1 %4 %6
        OpReturnValue %7
        OpFunctionEnd
    "#,
    );
    assert_eq!(test.module().bound, 8);
}

#[test]
fn test_locals_and_nested_block() {
    // float Sum(float a) {
    //     float b = a + 1.0;
    //     { float c = b; b = c * a; }
    //     return b;
    // }
    let mut ids = NodeIdGen::new();
    let a = Expression::identifier(&mut ids, "a");
    let one = Expression::literal(&mut ids, Literal::Float(1.0));
    let sum = Expression::binary(&mut ids, BinaryOperator::Add, a, one);
    let declare_b = Statement::declare(&mut ids, TypeName::new("float"), "b", Some(sum));

    let b = Expression::identifier(&mut ids, "b");
    let declare_c = Statement::declare(&mut ids, TypeName::new("float"), "c", Some(b));
    let c = Expression::identifier(&mut ids, "c");
    let a = Expression::identifier(&mut ids, "a");
    let product = Expression::binary(&mut ids, BinaryOperator::Mul, c, a);
    let target = Expression::identifier(&mut ids, "b");
    let assign = Statement::assign(target, product);

    let result = Expression::identifier(&mut ids, "b");
    let method = ShaderMethod::new(&mut ids, TypeName::new("float"), "Sum")
        .with_parameter(MethodParameter::new(&mut ids, TypeName::new("float"), "a"))
        .with_body(vec![
            declare_b,
            Statement::block(vec![declare_c, assign]),
            Statement::ret(Some(result)),
        ]);
    let shader = ShaderClass::new("Math").with_element(method);

    let test = ShaderTest::new(&shader).unwrap();
    test.assert_function(
        "Sum",
        r#"
        %3 = OpFunction %1 None %2
        OpName %3 "Sum"
        %4 = OpFunctionParameter %1
        OpName %4 "a"
        %5 = OpLabel
        %6 = OpConstant %1 1.0
        %7 = OpFAdd %1 %4 %6
        %8 = OpVariable %1 Function
        OpName %8 "b"
        OpStore %8 %7
        %9 = OpLoad %1 %8
        %10 = OpVariable %1 Function
        OpName %10 "c"
        OpStore %10 %9
        %11 = OpLoad %1 %10
        %12 = OpFMul %1 %11 %4
        OpStore %8 %12
        %13 = OpLoad %1 %8
        OpReturnValue %13
        OpFunctionEnd
    "#,
    );
}

#[test]
fn test_integer_arithmetic() {
    let mut ids = NodeIdGen::new();
    let n = Expression::identifier(&mut ids, "n");
    let three = Expression::literal(&mut ids, Literal::Int(3));
    let quotient = Expression::binary(&mut ids, BinaryOperator::Div, n, three);
    let method = ShaderMethod::new(&mut ids, TypeName::new("int"), "Third")
        .with_parameter(MethodParameter::new(&mut ids, TypeName::new("int"), "n"))
        .with_body(vec![Statement::ret(Some(quotient))]);
    let shader = ShaderClass::new("Math").with_element(method);

    let test = ShaderTest::new(&shader).unwrap();
    test.assert_function(
        "Third",
        r#"
        %3 = OpFunction %1 None %2
        OpName %3 "Third"
        %4 = OpFunctionParameter %1
        OpName %4 "n"
        %5 = OpLabel
        %6 = OpConstant %1 3
        %7 = OpSDiv %1 %4 %6
        OpReturnValue %7
        OpFunctionEnd
    "#,
    );
}

#[test]
fn test_entry_point_writes_stream() {
    let mut ids = NodeIdGen::new();
    let depth = ShaderMember::new(&mut ids, TypeName::new("float"), "Depth").stream();
    let target = Expression::streams(&mut ids, "Depth");
    let one = Expression::literal(&mut ids, Literal::Float(1.0));
    let vs = ShaderMethod::new(&mut ids, TypeName::new("void"), "VSMain")
        .with_body(vec![Statement::assign(target, one)]);
    let shader = ShaderClass::new("Streams").with_element(depth).with_element(vs);

    let test = ShaderTest::new(&shader).unwrap();
    test.assert_instructions(
        r#"
        %1 = OpTypeFloat 32
        OpName %1 "float"
        %2 = OpVariable %1 Function
        OpName %2 "Depth"
        %3 = OpTypeVoid
        OpName %3 "void"
        %4 = OpTypeFunction %3
        OpName %4 "fn_void"
        OpEntryPoint Vertex %5 "VSMain"
        %5 = OpFunction %3 None %4
        OpName %5 "VSMain"
        %6 = OpLabel
        %7 = OpConstant %1 1.0
        OpStore %2 %7
        OpReturn
        OpFunctionEnd
    "#,
    );
}

#[test]
fn test_method_reads_member_declared_later() {
    let mut ids = NodeIdGen::new();
    let scale = Expression::identifier(&mut ids, "Scale");
    let get = ShaderMethod::new(&mut ids, TypeName::new("float"), "Get")
        .with_body(vec![Statement::ret(Some(scale))]);
    let member = ShaderMember::new(&mut ids, TypeName::new("float"), "Scale");
    let shader = ShaderClass::new("Order").with_element(get).with_element(member);

    let test = ShaderTest::new(&shader).unwrap();
    test.assert_function(
        "Get",
        r#"
        %4 = OpFunction %1 None %3
        OpName %4 "Get"
        %5 = OpLabel
        %6 = OpLoad %1 %2
        OpReturnValue %6
        OpFunctionEnd
    "#,
    );
}

#[test]
fn test_statements_after_return_are_skipped() {
    let mut ids = NodeIdGen::new();
    let one = Expression::literal(&mut ids, Literal::Float(1.0));
    let two = Expression::literal(&mut ids, Literal::Float(2.0));
    let method = ShaderMethod::new(&mut ids, TypeName::new("float"), "Early")
        .with_body(vec![Statement::ret(Some(one)), Statement::ret(Some(two))]);
    let shader = ShaderClass::new("Flow").with_element(method);

    let test = ShaderTest::new(&shader).unwrap();
    assert_eq!(test.module().count_opcode("OpReturnValue"), 1);
    assert_eq!(test.module().count_opcode("OpConstant"), 1);
}

#[test]
fn test_functions_recorded_in_order() {
    let mut ids = NodeIdGen::new();
    let shader = ShaderClass::new("Order")
        .with_element(ShaderMethod::new(&mut ids, TypeName::new("void"), "A").with_body(vec![]))
        .with_element(ShaderMethod::new(&mut ids, TypeName::new("void"), "PSMain").with_body(vec![]))
        .with_element(ShaderMethod::new(&mut ids, TypeName::new("void"), "B"));

    let test = ShaderTest::new(&shader).unwrap();
    let names: Vec<_> = test.functions().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["A", "PSMain", "B"]);
    assert!(test.functions().iter().all(|f| f.state == MethodState::Finalized));
}
