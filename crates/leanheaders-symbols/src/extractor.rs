//! Reference site extraction
//!
//! Walks declarations and records every occurrence of a type name along
//! with the role it plays.

use crate::{ReferenceRole, ReferenceSite};
use leanheaders_ast::{Declaration, DeclarationKind, Ident, LineIndex, NameUse, SymbolKind, TypeRef};

/// Collects reference sites from declarations
pub struct ReferenceExtractor<'a> {
    lines: &'a LineIndex,
    sites: Vec<ReferenceSite>,
}

impl<'a> ReferenceExtractor<'a> {
    pub fn new(lines: &'a LineIndex) -> Self {
        Self {
            lines,
            sites: Vec::new(),
        }
    }

    /// Extract reference sites in source order
    pub fn extract(mut self, declarations: &[Declaration]) -> Vec<ReferenceSite> {
        for declaration in declarations {
            self.extract_declaration(declaration);
        }
        self.sites
    }

    fn extract_declaration(&mut self, declaration: &Declaration) {
        match &declaration.kind {
            DeclarationKind::Class(class) => {
                if class.is_category_like() {
                    self.push(&class.name, SymbolKind::Class, ReferenceRole::Inheritance);
                } else if let Some(superclass) = &class.superclass {
                    if let Some(name) = superclass.base() {
                        self.push(name, SymbolKind::Class, ReferenceRole::Inheritance);
                    }
                    let start = self.sites.len();
                    for arg in &superclass.generics {
                        self.extract_type(arg);
                    }
                    // Parameters of the class itself are not symbols
                    let args = self.sites.split_off(start);
                    self.sites.extend(
                        args.into_iter()
                            .filter(|site| !class.type_params.iter().any(|p| p.name == site.name)),
                    );
                }
                for protocol in &class.protocols {
                    self.push(protocol, SymbolKind::Protocol, ReferenceRole::Adoption);
                }
            }
            DeclarationKind::Protocol(proto) => {
                for protocol in &proto.protocols {
                    self.push(protocol, SymbolKind::Protocol, ReferenceRole::Adoption);
                }
            }
            DeclarationKind::Property(prop) => self.extract_type(&prop.ty),
            DeclarationKind::Method(method) => {
                if let Some(returns) = &method.returns {
                    self.extract_type(returns);
                }
                for param in method.params() {
                    if let Some(ty) = &param.ty {
                        self.extract_type(ty);
                    }
                }
            }
            DeclarationKind::BlockAlias(alias) => self.extract_type(&alias.signature),
            DeclarationKind::Alias(alias) => self.extract_type(&alias.target),
            // Raw enum types are primitives in practice; structs and
            // forwards introduce names without using any.
            DeclarationKind::Forward(_) | DeclarationKind::Struct(_) | DeclarationKind::Enum(_) => {}
        }
    }

    fn extract_type(&mut self, ty: &TypeRef) {
        let mut uses = Vec::new();
        ty.walk_names(&mut |name| uses.push(name));
        for name in uses {
            match name {
                NameUse::Base(ident) => self.push(ident, SymbolKind::Type, ReferenceRole::Composition),
                NameUse::Conformance(ident) => {
                    self.push(ident, SymbolKind::Protocol, ReferenceRole::Composition)
                }
            }
        }
    }

    fn push(&mut self, ident: &Ident, kind: SymbolKind, role: ReferenceRole) {
        self.sites.push(ReferenceSite {
            name: ident.name.clone(),
            kind,
            role,
            span: ident.span,
            line: self.lines.line(ident.span.start),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leanheaders_parser::parse;

    fn sites(source: &str) -> Vec<(String, SymbolKind, ReferenceRole)> {
        let header = parse(source);
        let lines = LineIndex::new(source);
        ReferenceExtractor::new(&lines)
            .extract(&header.declarations)
            .into_iter()
            .map(|site| (site.name, site.kind, site.role))
            .collect()
    }

    #[test]
    fn test_class_header_sites() {
        let found = sites("@interface A : B <P, Q>\n@end");
        assert_eq!(
            found,
            vec![
                ("B".to_string(), SymbolKind::Class, ReferenceRole::Inheritance),
                ("P".to_string(), SymbolKind::Protocol, ReferenceRole::Adoption),
                ("Q".to_string(), SymbolKind::Protocol, ReferenceRole::Adoption),
            ]
        );
    }

    #[test]
    fn test_category_target_is_inheritance() {
        let found = sites("@interface Target (Extras)\n@end");
        assert_eq!(found, vec![("Target".to_string(), SymbolKind::Class, ReferenceRole::Inheritance)]);
    }

    #[test]
    fn test_member_conformance_is_composition() {
        let found = sites("@property (weak) id<Delegate> delegate;");
        assert_eq!(
            found,
            vec![
                ("id".to_string(), SymbolKind::Type, ReferenceRole::Composition),
                ("Delegate".to_string(), SymbolKind::Protocol, ReferenceRole::Composition),
            ]
        );
    }

    #[test]
    fn test_method_sites_include_every_parameter() {
        let found = sites("- (Result *)run:(Job *)job with:(Context *)context;");
        let names: Vec<_> = found.iter().map(|(name, _, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Result", "Job", "Context"]);
    }

    #[test]
    fn test_enum_raw_type_is_not_a_site() {
        assert!(sites("typedef NS_ENUM(NSInteger, Mode) { ModeA };").is_empty());
    }

    #[test]
    fn test_sites_carry_lines() {
        let source = "@class A;\n\n@property A *a;";
        let header = parse(source);
        let lines = LineIndex::new(source);
        let found = ReferenceExtractor::new(&lines).extract(&header.declarations);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 3);
    }

    #[test]
    fn test_superclass_generic_arguments() {
        let found = sites("@interface Names : NSArray<Name *> <Listing>\n@end");
        assert_eq!(
            found,
            vec![
                ("NSArray".to_string(), SymbolKind::Class, ReferenceRole::Inheritance),
                ("Name".to_string(), SymbolKind::Type, ReferenceRole::Composition),
                ("Listing".to_string(), SymbolKind::Protocol, ReferenceRole::Adoption),
            ]
        );
    }

    #[test]
    fn test_superclass_type_parameters_are_not_sites() {
        let found = sites("@interface Box<T> : Base<T>\n@end");
        assert_eq!(found, vec![("Base".to_string(), SymbolKind::Class, ReferenceRole::Inheritance)]);
    }
}
