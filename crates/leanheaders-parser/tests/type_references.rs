//! Type reference grammar: qualifier positions, generic specification,
//! conformance lists and block signatures.

use leanheaders_ast::{QualifierKind, TypeRef};
use leanheaders_parser::parse_type;
use rstest::rstest;

fn ty(source: &str) -> TypeRef {
    match parse_type(source) {
        Ok(ty) => ty,
        Err(err) => panic!("failed to parse {:?}: {}", source, err),
    }
}

fn names(ty: &TypeRef) -> Vec<String> {
    let mut out = Vec::new();
    ty.walk_names(&mut |name| out.push(name.ident().name.clone()));
    out
}

// === Constants ===

#[rstest]
#[case("ConstType * const", 1, &[1])]
#[case("const PreConstType *", 1, &[0])]
#[case("InfixConstType const *", 1, &[0])]
#[case("ConstTypeNoSpace*const", 1, &[1])]
#[case("IndirectedConstType *const *", 2, &[1])]
#[case("ConstIndirectionType **const", 2, &[2])]
#[case("DoubleConstType * const * const", 2, &[1, 2])]
fn const_binds_to_its_level(#[case] source: &str, #[case] indirection: u8, #[case] levels: &[u8]) {
    let ty = ty(source);
    assert_eq!(ty.indirection, indirection, "{}", source);
    let const_levels: Vec<u8> = ty
        .qualifiers
        .iter()
        .filter(|q| q.kind == QualifierKind::Const)
        .map(|q| q.level)
        .collect();
    assert_eq!(const_levels, levels, "{}", source);
}

#[test]
fn star_const_spacing_is_irrelevant() {
    assert_eq!(ty("T * const").qualifiers, ty("T*const").qualifiers);
    assert_eq!(ty("const T *").qualifiers, ty("T const *").qualifiers);
}

// === Nullability ===

#[rstest]
#[case("NullableType * _Nullable", QualifierKind::Nullable, 1)]
#[case("NullableTypeNoSpace*_Nullable", QualifierKind::Nullable, 1)]
#[case("id<NullableProtocol> _Nullable", QualifierKind::Nullable, 0)]
#[case("NonNullType * _Nonnull", QualifierKind::Nonnull, 1)]
#[case("NullUnspecifiedType * _Null_unspecified", QualifierKind::NullUnspecified, 1)]
#[case("nonnull PrefixType *", QualifierKind::Nonnull, 0)]
fn nullability_binds_to_its_level(#[case] source: &str, #[case] kind: QualifierKind, #[case] level: u8) {
    assert!(ty(source).has_qualifier(kind, level), "{}", source);
}

#[test]
fn nullability_on_every_level() {
    let ty = ty("NullableIndirectedType * _Nullable * _Nullable");
    assert_eq!(ty.indirection, 2);
    assert!(ty.has_qualifier(QualifierKind::Nullable, 1));
    assert!(ty.has_qualifier(QualifierKind::Nullable, 2));
}

#[test]
fn nullability_and_const_share_a_level() {
    let ty = ty("NonNullConstType * _Nonnull const");
    assert!(ty.has_qualifier(QualifierKind::Nonnull, 1));
    assert!(ty.has_qualifier(QualifierKind::Const, 1));
}

// === Conformance ===

#[test]
fn conformance_list() {
    let ty = ty("MultiConformingType<Protocol, AnotherProtocol> *");
    assert!(ty.generics.is_empty());
    let protocols: Vec<_> = ty.conformances.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(protocols, vec!["Protocol", "AnotherProtocol"]);
    assert_eq!(ty.indirection, 1);
}

#[test]
fn id_with_protocol() {
    let ty = ty("id<NSCopying>");
    assert_eq!(ty.base_name(), Some("id"));
    assert_eq!(ty.conformances.len(), 1);
    assert_eq!(ty.indirection, 0);
}

// === Generic Specification ===

#[test]
fn generic_argument() {
    let ty = ty("GenericType<SpecifingType *> *");
    assert!(ty.conformances.is_empty());
    assert_eq!(ty.generics.len(), 1);
    assert_eq!(ty.generics[0].base_name(), Some("SpecifingType"));
    assert_eq!(ty.generics[0].indirection, 1);
}

#[test]
fn qualified_generic_argument() {
    let nullable = ty("NullableGenericType<SpecifingType * _Nullable> *");
    assert!(nullable.generics[0].has_qualifier(QualifierKind::Nullable, 1));

    let constant = ty("ConstGenericType<SpecifingType * const> *");
    assert!(constant.generics[0].has_qualifier(QualifierKind::Const, 1));
}

#[test]
fn nested_generics_mirror_the_source() {
    let ty = ty("NestedGenericType< SpecifingType<NestedSpecifier*> * > *");
    assert_eq!(ty.base_name(), Some("NestedGenericType"));
    assert_eq!(ty.indirection, 1);

    let inner = &ty.generics[0];
    assert_eq!(inner.base_name(), Some("SpecifingType"));
    assert_eq!(inner.indirection, 1);

    let innermost = &inner.generics[0];
    assert_eq!(innermost.base_name(), Some("NestedSpecifier"));
    assert_eq!(innermost.indirection, 1);
    assert!(innermost.generics.is_empty());
}

#[test]
fn multiple_nested_generics() {
    let ty = ty("MultiNestedGenericType< SpecifingTypeA<NestedSpecifierA*> *, SpecifingTypeB<NestedSpecifierB*> * > *");
    assert_eq!(ty.generics.len(), 2);
    assert_eq!(ty.generics[1].generics[0].base_name(), Some("NestedSpecifierB"));
}

#[test]
fn conformance_inside_generic_argument() {
    let ty = ty("NestedConformanceGenericType<SpecifingType<WithConformance>*> *");
    let inner = &ty.generics[0];
    assert!(inner.generics.is_empty());
    assert_eq!(inner.conformances[0].name, "WithConformance");
}

#[test]
fn mixed_entries_are_generics() {
    let ty = ty("MultiConformingGenericType< SpecifingType<WithConformance>*, AnotherSpecifyingType* > *");
    assert!(ty.conformances.is_empty());
    assert_eq!(ty.generics.len(), 2);
}

#[test]
fn deep_nesting_has_no_limit() {
    let ty = ty("A<B<C<D<E<F *> *> *> *> *> *");
    assert_eq!(names(&ty), vec!["A", "B", "C", "D", "E", "F"]);
}

// === Block Syntax ===

#[test]
fn named_block() {
    let ty = ty("BlockReturn (^blockName)(BlockParam param)");
    let block = ty.block().expect("block");
    assert_eq!(block.name.as_ref().map(|n| n.name.as_str()), Some("blockName"));
    assert_eq!(block.returns.base_name(), Some("BlockReturn"));
    assert_eq!(block.arity(), 1);
    assert_eq!(block.params[0].name.as_ref().map(|n| n.name.as_str()), Some("param"));
}

#[test]
fn void_parameter_list_is_empty() {
    let ty = ty("void (^pureBlock)(void)");
    let block = ty.block().expect("block");
    assert_eq!(block.arity(), 0);
    assert_eq!(names(&ty), vec!["void"]);
}

#[test]
fn anonymous_parameters_keep_arity() {
    let ty = ty("NoParamIDsBlockReturn (^noParamIdsBlock)(BlockParamWithoutIDA *, BlockParamWithoutIDB)");
    let block = ty.block().expect("block");
    assert_eq!(block.arity(), 2);
    assert!(block.params.iter().all(|p| p.name.is_none()));
    assert_eq!(block.params[0].ty.indirection, 1);
}

#[test]
fn unnamed_block() {
    let ty = ty("NoNameBlockReturn (^)(NoNameBlockParam)");
    let block = ty.block().expect("block");
    assert!(block.name.is_none());
    assert_eq!(block.arity(), 1);
}

#[test]
fn nullable_block_pointer() {
    let ty = ty("void (^nullable)(BlockMethodParam param)");
    assert!(ty.is_block());
    assert!(ty.has_qualifier(QualifierKind::Nullable, 0));
}

#[test]
fn block_with_nested_generic_parameters() {
    let ty = ty("void(^Nested)(NSArray<SpecA *> *listA, NSDictionary<Param<SpecB *> *, ValueType> *listB)");
    let block = ty.block().expect("block");
    assert_eq!(block.arity(), 2);
    assert_eq!(block.params[1].ty.generics.len(), 2);
    assert_eq!(
        names(&ty),
        vec!["void", "NSArray", "SpecA", "NSDictionary", "Param", "SpecB", "ValueType"]
    );
}

#[test]
fn block_parameter_is_a_block() {
    let ty = ty("void (^outer)(void (^inner)(int), BOOL)");
    let block = ty.block().expect("block");
    assert_eq!(block.arity(), 2);
    assert_eq!(block.params[0].ty.block().map(|b| b.arity()), Some(1));
}
