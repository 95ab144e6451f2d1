//! Behavioural tests for individual copy routines.
//!
//! Each test renders a small universe and checks the statements emitted for
//! one member kind or directive.

use copygen_codegen::{pipeline::Severity, testing::compile};
use copygen_codegen_go::{Generator, Synthesis};

fn synthesize(manifest: &str) -> Synthesis {
    let mut ctx = compile(manifest);
    Generator::from_context(&mut ctx)
        .expect("pipeline produced a selection")
        .synthesize()
        .expect("synthesis should succeed")
}

/// Content of the only generated file.
fn only_file(manifest: &str) -> String {
    let synthesis = synthesize(manifest);
    assert_eq!(synthesis.files.len(), 1, "expected exactly one file");
    synthesis.files[0].content.clone()
}

/// Wrap member declarations in a one-type package.
fn with_members(members: &str, extra: &str) -> String {
    format!(
        r#"
        [[packages]]
        path = "p/api"
        comments = ["+k8s:deepcopy-gen=package"]

        [[packages.types]]
        name = "T"
        kind = "struct"
        members = [{members}]
        {extra}
        "#
    )
}

fn assert_contains(content: &str, expected: &str) {
    assert!(
        content.contains(expected),
        "expected to find:\n{expected}\n\nin:\n{content}"
    );
}

#[test]
fn test_declared_deep_copy_returning_value_is_wrapped() {
    let content = only_file(
        r#"
        [[packages]]
        path = "p/api"
        comments = ["+k8s:deepcopy-gen=package"]

        [[packages.types]]
        name = "Quantity"
        kind = "struct"
        members = [{ name = "Parts", type = "[]string" }]
        methods = [{ name = "DeepCopy", receiver = "value", results = ["Quantity"] }]
        "#,
    );
    assert_contains(
        &content,
        "func (in *Quantity) DeepCopyInto(out *Quantity) {\n\t*out = in.DeepCopy()\n\treturn\n}\n",
    );
    assert!(!content.contains("func (in *Quantity) DeepCopy() "));
}

#[test]
fn test_declared_deep_copy_returning_pointer_is_wrapped() {
    let content = only_file(
        r#"
        [[packages]]
        path = "p/api"
        comments = ["+k8s:deepcopy-gen=package"]

        [[packages.types]]
        name = "Big"
        kind = "struct"
        methods = [{ name = "DeepCopy", results = ["*Big"] }]
        "#,
    );
    assert_contains(
        &content,
        "\tclone := in.DeepCopy()\n\t*out = *clone\n\treturn\n",
    );
}

#[test]
fn test_declared_deep_copy_with_params_is_flagged() {
    let synthesis = synthesize(
        r#"
        [[packages]]
        path = "p/api"
        comments = ["+k8s:deepcopy-gen=package"]

        [[packages.types]]
        name = "Odd"
        kind = "struct"
        methods = [{ name = "DeepCopy", params = ["int"], results = ["Odd"] }]
        "#,
    );
    let content = &synthesis.files[0].content;
    assert_contains(
        content,
        "\t// FIXME: DeepCopy method of Odd has an unsupported signature\n\treturn\n",
    );
    assert_eq!(synthesis.diagnostics.len(), 1);
    assert_eq!(synthesis.diagnostics[0].severity, Severity::Warning);
    assert_eq!(synthesis.diagnostics[0].location.as_deref(), Some("p/api.Odd"));
}

#[test]
fn test_declared_deep_copy_into_is_not_generated() {
    let content = only_file(
        r#"
        [[packages]]
        path = "p/api"
        comments = ["+k8s:deepcopy-gen=package"]

        [[packages.types]]
        name = "Manual"
        kind = "struct"
        methods = [{ name = "DeepCopyInto", params = ["*Manual"] }]
        "#,
    );
    assert!(!content.contains("DeepCopyInto(out *Manual)"));
    assert_contains(&content, "func (in *Manual) DeepCopy() *Manual {");
}

#[test]
fn test_member_overrides_are_called() {
    let content = only_file(&with_members(
        r#"{ name = "Q", type = "Quantity" }, { name = "L", type = "Labels" }"#,
        r#"
        [[packages.types]]
        name = "Quantity"
        kind = "struct"
        comments = ["+k8s:deepcopy-gen=false"]
        methods = [{ name = "DeepCopy", receiver = "value", results = ["Quantity"] }]

        [[packages.types]]
        name = "Labels"
        kind = "alias"
        underlying = "map[string]string"
        methods = [{ name = "DeepCopy", receiver = "value", results = ["Labels"] }]
        "#,
    ));
    assert_contains(&content, "\tout.Q = in.Q.DeepCopy()\n");
    assert_contains(
        &content,
        "\tif in.L != nil {\n\t\tout.L = in.L.DeepCopy()\n\t}\n",
    );
}

#[test]
fn test_struct_members() {
    let content = only_file(&with_members(
        r#"{ name = "Plain", type = "Plain" }, { name = "Deep", type = "Deep" }"#,
        r#"
        [[packages.types]]
        name = "Plain"
        kind = "struct"
        members = [{ name = "A", type = "int" }]

        [[packages.types]]
        name = "Deep"
        kind = "struct"
        members = [{ name = "P", type = "*int" }]
        "#,
    ));
    assert_contains(&content, "\tout.Plain = in.Plain\n");
    assert_contains(&content, "\tin.Deep.DeepCopyInto(&out.Deep)\n");
}

#[test]
fn test_alias_member_keeps_alias_name() {
    let content = only_file(&with_members(
        r#"{ name = "Names", type = "Names" }"#,
        r#"
        [[packages.types]]
        name = "Names"
        kind = "alias"
        underlying = "[]string"
        "#,
    ));
    assert_contains(
        &content,
        "\tif in.Names != nil {\n\
         \t\tin, out := &in.Names, &out.Names\n\
         \t\t*out = make(Names, len(*in))\n\
         \t\tcopy(*out, *in)\n\
         \t}\n",
    );
}

#[test]
fn test_interface_members() {
    let synthesis = synthesize(&with_members(
        r#"{ name = "Obj", type = "q/runtime.Object" }, { name = "Any", type = "interface{}" }"#,
        r#"
        [[packages]]
        path = "q/runtime"
        input = false

        [[packages.types]]
        name = "Object"
        kind = "interface"
        "#,
    ));
    let content = &synthesis.files[0].content;
    assert_contains(
        content,
        "\tif in.Obj != nil {\n\t\tout.Obj = in.Obj.DeepCopyObject()\n\t}\n",
    );
    assert_contains(content, "\t// FIXME: Type interface{} is unsupported.\n");
    // A method call on an interface value needs no import.
    assert!(!content.contains("import ("));

    assert_eq!(synthesis.diagnostics.len(), 1);
    assert_eq!(synthesis.diagnostics[0].location.as_deref(), Some("p/api.T.Any"));
}

#[test]
fn test_pointer_to_pointer_and_pointer_to_slice() {
    let content = only_file(&with_members(
        r#"{ name = "PP", type = "**string" }, { name = "PS", type = "*[]string" }"#,
        "",
    ));
    assert_contains(
        &content,
        "\tif in.PP != nil {\n\
         \t\tin, out := &in.PP, &out.PP\n\
         \t\t*out = new(*string)\n\
         \t\tif **in != nil {\n\
         \t\t\tin, out := *in, *out\n\
         \t\t\t*out = new(string)\n\
         \t\t\t**out = **in\n\
         \t\t}\n\
         \t}\n",
    );
    assert_contains(
        &content,
        "\t\t*out = new([]string)\n\
         \t\tif **in != nil {\n\
         \t\t\tin, out := *in, *out\n\
         \t\t\t*out = make([]string, len(*in))\n\
         \t\t\tcopy(*out, *in)\n\
         \t\t}\n",
    );
}

#[test]
fn test_slice_element_kinds() {
    let content = only_file(&with_members(
        r#"
        { name = "Nested", type = "[][]string" },
        { name = "Objs", type = "[]q/runtime.Object" },
        { name = "Ptrs", type = "[]*int" },
        "#,
        r#"
        [[packages]]
        path = "q/runtime"
        input = false

        [[packages.types]]
        name = "Object"
        kind = "interface"
        "#,
    ));
    assert_contains(
        &content,
        "\t\t*out = make([][]string, len(*in))\n\
         \t\tfor i := range *in {\n\
         \t\t\tif (*in)[i] != nil {\n\
         \t\t\t\tin, out := &(*in)[i], &(*out)[i]\n\
         \t\t\t\t*out = make([]string, len(*in))\n\
         \t\t\t\tcopy(*out, *in)\n\
         \t\t\t}\n\
         \t\t}\n",
    );
    assert_contains(
        &content,
        "\t\t\tif (*in)[i] != nil {\n\t\t\t\t(*out)[i] = (*in)[i].DeepCopyObject()\n\t\t\t}\n",
    );
    assert_contains(&content, "\t\t*out = make([]runtime.Object, len(*in))\n");
    assert_contains(&content, "\t\t\t\t*out = new(int)\n\t\t\t\t**out = **in\n");
    assert_contains(&content, "\truntime \"q/runtime\"\n");
}

#[test]
fn test_map_value_kinds() {
    let content = only_file(&with_members(
        r#"
        { name = "Set", type = "map[string]struct{}" },
        { name = "Lists", type = "map[string][]int" },
        { name = "Things", type = "map[string]Thing" },
        { name = "Ext", type = "map[string]q/ext.Other" },
        "#,
        r#"
        [[packages.types]]
        name = "Thing"
        kind = "struct"
        members = [{ name = "P", type = "*int" }]

        [[packages]]
        path = "q/ext"
        input = false

        [[packages.types]]
        name = "Other"
        kind = "struct"
        members = [{ name = "P", type = "*int" }]
        "#,
    ));
    assert_contains(
        &content,
        "\t\tfor key := range *in {\n\t\t\t(*out)[key] = struct{}{}\n\t\t}\n",
    );
    assert_contains(
        &content,
        "\t\tfor key, val := range *in {\n\
         \t\t\tvar outVal []int\n\
         \t\t\tif val == nil {\n\
         \t\t\t\t(*out)[key] = nil\n\
         \t\t\t} else {\n\
         \t\t\t\tin, out := &val, &outVal\n\
         \t\t\t\t*out = make([]int, len(*in))\n\
         \t\t\t\tcopy(*out, *in)\n\
         \t\t\t}\n\
         \t\t\t(*out)[key] = outVal\n\
         \t\t}\n",
    );
    // Thing is generated alongside, Other lives outside the bounding dirs.
    assert_contains(
        &content,
        "\t\t\tnewVal := new(Thing)\n\t\t\tval.DeepCopyInto(newVal)\n\t\t\t(*out)[key] = *newVal\n",
    );
    assert_contains(&content, "\t\t\t(*out)[key] = *val.DeepCopy()\n");
    assert_contains(&content, "make(map[string]ext.Other, len(*in))");
}

#[test]
fn test_map_with_interface_values() {
    let content = only_file(&with_members(
        r#"{ name = "Objs", type = "map[string]Object" }"#,
        r#"
        [[packages.types]]
        name = "Object"
        kind = "interface"
        "#,
    ));
    assert_contains(
        &content,
        "\t\tfor key, val := range *in {\n\
         \t\t\tif val == nil {\n\
         \t\t\t\t(*out)[key] = nil\n\
         \t\t\t} else {\n\
         \t\t\t\t(*out)[key] = val.DeepCopyObject()\n\
         \t\t\t}\n\
         \t\t}\n",
    );
}

#[test]
fn test_unassignable_map_key_is_flagged() {
    let synthesis = synthesize(&with_members(
        r#"{ name = "Index", type = "map[*string]int" }"#,
        "",
    ));
    let content = &synthesis.files[0].content;
    assert_contains(
        content,
        "\tif in.Index != nil {\n\
         \t\tin, out := &in.Index, &out.Index\n\
         \t\t*out = make(map[*string]int, len(*in))\n\
         \t\tfor range *in {\n\
         \t\t\t// FIXME: Copying unassignable keys unsupported *string\n\
         \t\t}\n\
         \t}\n",
    );
    assert_eq!(
        synthesis.diagnostics[0].location.as_deref(),
        Some("p/api.T.Index")
    );
}

#[test]
fn test_markers_never_follow_unused_shadowing() {
    let synthesis = synthesize(&with_members(
        r#"
        { name = "Fns", type = "[]func()" },
        { name = "PI", type = "*interface{}" },
        { name = "Grid", type = "[][]func()" },
        { name = "Hooks", type = "map[string][]func()" },
        { name = "Deep", type = "**chan int" },
        "#,
        "",
    ));
    let content = &synthesis.files[0].content;

    let lines: Vec<&str> = content.lines().collect();
    for pair in lines.windows(2) {
        assert!(
            !(pair[0].trim_start().starts_with("in, out :=")
                && pair[1].trim_start().starts_with("// FIXME:")),
            "marker right after `{}` leaves in/out unused:\n{content}",
            pair[0].trim()
        );
    }

    assert_contains(content, "\t*out = *in\n\t// FIXME: Type func() is unsupported.\n");
    assert_contains(content, "\t// FIXME: Type interface{} is unsupported.\n");
    assert_contains(content, "\t// FIXME: Type chan int is unsupported.\n");
    assert!(!content.contains("if in.Fns != nil"));
    assert!(!content.contains("make([][]func()"));
    assert!(!content.contains("make(map[string][]func()"));
    assert_eq!(synthesis.diagnostics.len(), 5);
}

#[test]
fn test_bounding_dirs_widen_copyable_structs() {
    let manifest = with_members(
        r#"{ name = "Ext", type = "map[string]q/ext.Other" }"#,
        r#"
        [[packages]]
        path = "q/ext"
        input = false

        [[packages.types]]
        name = "Other"
        kind = "struct"
        members = [{ name = "P", type = "*int" }]
        "#,
    );
    let manifest = format!("[generator]\nbounding_dirs = [\"p\", \"q/\"]\n{manifest}");
    let content = only_file(&manifest);
    assert_contains(&content, "\t\t\tnewVal := new(ext.Other)\n");
}

#[test]
fn test_interface_adapters_sorted_with_pointer_receiver() {
    let content = only_file(
        r#"
        [[packages]]
        path = "p/api"

        [[packages.types]]
        name = "Pod"
        kind = "struct"
        second_closest_comments = ["+k8s:deepcopy-gen:interfaces=q/runtime.Object"]
        comments = [
            "+k8s:deepcopy-gen=true",
            "+k8s:deepcopy-gen:interfaces=p/api.Copier,q/runtime.Object",
        ]

        [[packages.types]]
        name = "Copier"
        kind = "interface"

        [[packages]]
        path = "q/runtime"
        input = false

        [[packages.types]]
        name = "Object"
        kind = "interface"
        "#,
    );
    assert_contains(
        &content,
        "func (in *Pod) DeepCopyCopier() Copier {\n\
         \tif c := in.DeepCopy(); c != nil {\n\
         \t\treturn c\n\
         \t}\n\
         \treturn nil\n\
         }\n",
    );
    let copier = content.find("DeepCopyCopier").unwrap();
    let object = content.find("DeepCopyObject").unwrap();
    assert!(copier < object);
    assert_eq!(content.matches("func (in *Pod) DeepCopyObject()").count(), 1);
    assert_contains(&content, "func (in *Pod) DeepCopyObject() runtime.Object {");
}

#[test]
fn test_registration_lists_candidates_in_order() {
    let content = only_file(
        r#"
        [[packages]]
        path = "p/api"
        comments = ["+k8s:deepcopy-gen=package,register"]

        [[packages.types]]
        name = "B"
        kind = "struct"

        [[packages.types]]
        name = "A"
        kind = "struct"

        [[packages.types]]
        name = "Skipped"
        kind = "struct"
        comments = ["+k8s:deepcopy-gen=false"]
        "#,
    );
    assert_contains(
        &content,
        "func RegisterDeepCopies(register func(prototype interface{}, deepCopyInto func(in, out interface{}))) {\n\
         \tregister(&B{}, func(in, out interface{}) { in.(*B).DeepCopyInto(out.(*B)) })\n\
         \tregister(&A{}, func(in, out interface{}) { in.(*A).DeepCopyInto(out.(*A)) })\n\
         }\n",
    );
    assert!(!content.contains("Skipped"));
}

#[test]
fn test_no_registration_without_option() {
    let content = only_file(&with_members("", ""));
    assert!(!content.contains("RegisterDeepCopies"));
}

#[test]
fn test_routines_follow_declaration_order() {
    let content = only_file(
        r#"
        [[packages]]
        path = "p/api"
        comments = ["+k8s:deepcopy-gen=package"]

        [[packages.types]]
        name = "Zeta"
        kind = "struct"

        [[packages.types]]
        name = "Alpha"
        kind = "struct"
        "#,
    );
    let zeta = content.find("func (in *Zeta) DeepCopyInto").unwrap();
    let alpha = content.find("func (in *Alpha) DeepCopyInto").unwrap();
    assert!(zeta < alpha);
}

#[test]
fn test_import_collision_gets_longer_name() {
    let content = only_file(&with_members(
        r#"{ name = "A", type = "*a/v1.Thing" }, { name = "B", type = "*b/v1.Thing" }"#,
        r#"
        [[packages]]
        path = "a/v1"
        input = false

        [[packages.types]]
        name = "Thing"
        kind = "struct"

        [[packages]]
        path = "b/v1"
        input = false

        [[packages.types]]
        name = "Thing"
        kind = "struct"
        "#,
    ));
    assert_contains(&content, "import (\n\tv1 \"a/v1\"\n\tbv1 \"b/v1\"\n)\n");
    assert_contains(&content, "*out = new(v1.Thing)");
    assert_contains(&content, "*out = new(bv1.Thing)");
}

#[test]
fn test_custom_tag_and_build_tag() {
    let content = only_file(
        r#"
        [generator]
        tag = "copy"
        build_tag = "nocopy"

        [[packages]]
        path = "p/api"
        comments = ["+copy=package"]

        [[packages.types]]
        name = "T"
        kind = "struct"
        "#,
    );
    assert!(content.starts_with("//go:build !nocopy\n// +build !nocopy\n\n"));
    assert_contains(&content, "func (in *T) DeepCopyInto(out *T) {\n\t*out = *in\n\treturn\n}\n");
}

#[test]
fn test_boilerplate_is_placed_after_build_tags() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("header.txt"), "// Copyright 2026 The Authors.\n").unwrap();

    let mut ctx = compile(&format!(
        "[generator]\nboilerplate = \"header.txt\"\n{}",
        with_members("", "")
    ));
    let synthesis = Generator::from_context(&mut ctx)
        .unwrap()
        .with_base_dir(dir.path())
        .synthesize()
        .unwrap();
    assert!(synthesis.files[0].content.starts_with(
        "//go:build !ignore_autogenerated\n\
         // +build !ignore_autogenerated\n\
         \n\
         // Copyright 2026 The Authors.\n\
         \n\
         // Code generated by copygen. DO NOT EDIT.\n"
    ));
}
