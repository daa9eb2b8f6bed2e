use docsieve::{
    FieldDescriptor, FieldType, FilterTree, Literal, MemoryCollection, Operator, Schema, compile,
};
use serde_json::{Value, json};

const A: &str = "6124e80f3f5fc839830c1f69";
const B: &str = "6124e80f3f5fc839830c1f6a";
const C: &str = "6124e80f3f5fc839830c1f6b";

fn schema(nullable: bool) -> Schema {
    let field = FieldDescriptor::new("objectId", FieldType::ObjectId);
    let field = if nullable { field.nullable() } else { field };
    Schema::new("foos").with_field(field)
}

fn foos() -> MemoryCollection {
    MemoryCollection::with_records(
        "foos",
        vec![
            json!({ "objectId": { "$oid": A } }),
            json!({ "objectId": { "$oid": B } }),
            json!({ "objectId": { "$oid": C } }),
        ],
    )
}

fn nullable_foos() -> MemoryCollection {
    MemoryCollection::with_records(
        "foos",
        vec![
            json!({ "objectId": { "$oid": A } }),
            json!({ "objectId": null }),
            json!({ "objectId": { "$oid": B } }),
            json!({ "objectId": { "$oid": C } }),
        ],
    )
}

fn lit(hex: Option<&str>) -> Literal {
    match hex {
        Some(h) => Literal::String(h.to_string()),
        None => Literal::Null,
    }
}

/// Ids of the matching records, `None` for a null id.
fn run(
    collection: &MemoryCollection,
    nullable: bool,
    op: Operator,
    literal: Literal,
) -> Vec<Option<String>> {
    let tree = FilterTree::single("objectId", op, literal);
    let predicate = compile(&tree, &schema(nullable)).unwrap();
    collection
        .execute(&predicate)
        .unwrap()
        .iter()
        .map(|record| match &record["objectId"] {
            Value::Null => None,
            other => Some(other["$oid"].as_str().unwrap().to_string()),
        })
        .collect()
}

fn ids(hexes: &[&str]) -> Vec<Option<String>> {
    hexes.iter().map(|h| Some(h.to_string())).collect()
}

fn check(op: Operator, expected: [&[&str]; 4]) {
    let coll = foos();
    for (literal, want) in [Some(A), Some(B), Some(C), None].into_iter().zip(expected) {
        assert_eq!(
            run(&coll, false, op, lit(literal)),
            ids(want),
            "{op} {literal:?}"
        );
    }
}

#[test]
fn test_object_id_equal() {
    check(Operator::Eq, [&[A], &[B], &[C], &[]]);
}

#[test]
fn test_object_id_not_equal() {
    check(Operator::Neq, [&[B, C], &[A, C], &[A, B], &[A, B, C]]);
}

#[test]
fn test_object_id_greater_than() {
    check(Operator::Gt, [&[B, C], &[C], &[], &[]]);
}

#[test]
fn test_object_id_not_greater_than() {
    check(Operator::Ngt, [&[A], &[A, B], &[A, B, C], &[A, B, C]]);
}

#[test]
fn test_object_id_greater_than_or_equals() {
    check(Operator::Gte, [&[A, B, C], &[B, C], &[C], &[]]);
}

#[test]
fn test_object_id_not_greater_than_or_equals() {
    check(Operator::Ngte, [&[], &[A], &[A, B], &[A, B, C]]);
}

#[test]
fn test_object_id_lower_than() {
    check(Operator::Lt, [&[], &[A], &[A, B], &[]]);
}

#[test]
fn test_object_id_not_lower_than() {
    check(Operator::Nlt, [&[A, B, C], &[B, C], &[C], &[A, B, C]]);
}

#[test]
fn test_object_id_lower_than_or_equals() {
    check(Operator::Lte, [&[A], &[A, B], &[A, B, C], &[]]);
}

#[test]
fn test_object_id_not_lower_than_or_equals() {
    check(Operator::Nlte, [&[B, C], &[C], &[], &[A, B, C]]);
}

#[test]
fn test_object_id_nullable_in() {
    let coll = nullable_foos();
    let set = |items: &[Option<&str>]| Literal::List(items.iter().map(|h| lit(*h)).collect());

    assert_eq!(run(&coll, true, Operator::In, set(&[Some(A), Some(B)])), ids(&[A, B]));
    assert_eq!(run(&coll, true, Operator::In, set(&[Some(B), Some(C)])), ids(&[B, C]));
    assert_eq!(
        run(&coll, true, Operator::In, set(&[Some(B), None])),
        vec![None, Some(B.to_string())]
    );
}

#[test]
fn test_object_id_nullable_not_in() {
    let coll = nullable_foos();
    let set = |items: &[Option<&str>]| Literal::List(items.iter().map(|h| lit(*h)).collect());

    assert_eq!(
        run(&coll, true, Operator::Nin, set(&[Some(A), Some(B)])),
        vec![None, Some(C.to_string())]
    );
    assert_eq!(
        run(&coll, true, Operator::Nin, set(&[Some(B), Some(C)])),
        vec![Some(A.to_string()), None]
    );
    assert_eq!(run(&coll, true, Operator::Nin, set(&[Some(B), None])), ids(&[A, C]));
}

#[test]
fn test_negated_ordering_keeps_null_records() {
    let coll = nullable_foos();
    assert_eq!(
        run(&coll, true, Operator::Ngt, lit(Some(A))),
        vec![Some(A.to_string()), None]
    );
    assert_eq!(run(&coll, true, Operator::Gt, lit(Some(A))), ids(&[B, C]));
    assert_eq!(run(&coll, true, Operator::Nlte, lit(None)).len(), 4);
}

#[test]
fn test_missing_field_behaves_like_null() {
    let coll = MemoryCollection::with_records(
        "foos",
        vec![json!({}), json!({ "objectId": { "$oid": B } })],
    );
    assert_eq!(run(&coll, true, Operator::Eq, lit(None)), vec![None]);
    assert_eq!(run(&coll, true, Operator::Neq, lit(None)), ids(&[B]));
    assert_eq!(run(&coll, true, Operator::Nlt, lit(Some(C))), vec![None]);
}

#[test]
fn test_range_on_one_field() {
    let coll = nullable_foos();
    let tree = FilterTree::new().field(
        docsieve::FieldFilter::new("objectId")
            .with(Operator::Gte, lit(Some(A)))
            .with(Operator::Lt, lit(Some(C))),
    );
    let predicate = compile(&tree, &schema(true)).unwrap();
    let found = coll.execute(&predicate).unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0]["objectId"]["$oid"], A);
    assert_eq!(found[1]["objectId"]["$oid"], B);
}

#[test]
fn test_compiling_twice_is_identical() {
    let tree = FilterTree::single(
        "objectId",
        Operator::Nin,
        Literal::List(vec![lit(Some(B)), lit(None)]),
    );
    let first = compile(&tree, &schema(true)).unwrap();
    let second = compile(&tree, &schema(true)).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_document(), second.to_document());
}

const ID_A: Option<&str> = Some(A);
const ID_B: Option<&str> = Some(B);
const ID_C: Option<&str> = Some(C);
const NIL: Option<&str> = None;
const EVERY: &[Option<&str>] = &[ID_A, NIL, ID_B, ID_C];

/// Runs `op` against the collection holding a null id, in record order A, null, B, C.
fn check_nullable(op: Operator, expected: [&[Option<&str>]; 4]) {
    let coll = nullable_foos();
    for (literal, want) in [Some(A), Some(B), Some(C), None].into_iter().zip(expected) {
        let want: Vec<Option<String>> = want.iter().map(|id| id.map(str::to_string)).collect();
        assert_eq!(run(&coll, true, op, lit(literal)), want, "{op} {literal:?}");
    }
}

#[test]
fn test_nullable_object_id_equal() {
    check_nullable(Operator::Eq, [&[ID_A], &[ID_B], &[ID_C], &[NIL]]);
}

#[test]
fn test_nullable_object_id_not_equal() {
    check_nullable(
        Operator::Neq,
        [&[NIL, ID_B, ID_C], &[ID_A, NIL, ID_C], &[ID_A, NIL, ID_B], &[ID_A, ID_B, ID_C]],
    );
}

#[test]
fn test_nullable_object_id_greater_than() {
    check_nullable(Operator::Gt, [&[ID_B, ID_C], &[ID_C], &[], &[]]);
}

#[test]
fn test_nullable_object_id_not_greater_than() {
    check_nullable(Operator::Ngt, [&[ID_A, NIL], &[ID_A, NIL, ID_B], EVERY, EVERY]);
}

#[test]
fn test_nullable_object_id_greater_than_or_equals() {
    check_nullable(Operator::Gte, [&[ID_A, ID_B, ID_C], &[ID_B, ID_C], &[ID_C], &[]]);
}

#[test]
fn test_nullable_object_id_not_greater_than_or_equals() {
    check_nullable(Operator::Ngte, [&[NIL], &[ID_A, NIL], &[ID_A, NIL, ID_B], EVERY]);
}

#[test]
fn test_nullable_object_id_lower_than() {
    check_nullable(Operator::Lt, [&[], &[ID_A], &[ID_A, ID_B], &[]]);
}

#[test]
fn test_nullable_object_id_not_lower_than() {
    check_nullable(Operator::Nlt, [EVERY, &[NIL, ID_B, ID_C], &[NIL, ID_C], EVERY]);
}

#[test]
fn test_nullable_object_id_lower_than_or_equals() {
    check_nullable(Operator::Lte, [&[ID_A], &[ID_A, ID_B], &[ID_A, ID_B, ID_C], &[]]);
}

#[test]
fn test_nullable_object_id_not_lower_than_or_equals() {
    check_nullable(Operator::Nlte, [&[NIL, ID_B, ID_C], &[NIL, ID_C], &[NIL], EVERY]);
}
